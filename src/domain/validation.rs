use super::draft::AutoPayDraft;
use std::collections::BTreeMap;
use std::fmt;

/// Which part of the wizard an error message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Date,
    Frequency,
    PaymentLimit,
    /// Not tied to a single input, e.g. a failed save.
    General,
}

/// Error messages keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(Field::General, message);
        errors
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: ValidationErrors,
    pub is_valid: bool,
}

/// Checks that a draft carries everything a saved configuration needs.
///
/// Pure: safe to call on every draft change without touching the errors the
/// wizard currently displays.
pub fn validate(draft: &AutoPayDraft) -> ValidationResult {
    let mut errors = ValidationErrors::new();

    if draft.selected_date.is_none() {
        errors.insert(Field::Date, "Please select a payment date");
    }

    if draft.frequency.is_none() {
        errors.insert(Field::Frequency, "Please select a payment frequency");
    }

    if !draft.has_positive_limit() {
        errors.insert(Field::PaymentLimit, "Please enter a valid payment limit");
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
