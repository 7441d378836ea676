use super::draft::{AutoPayDraft, format_currency};
use crate::error::Result;
use jiff::civil::Date;

/// Read-only recap of a draft, rendered on the review step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSummary {
    pub payment_date: String,
    pub frequency: String,
    pub payment_limit: String,
    pub next_payment: Option<Date>,
    pub is_complete: bool,
    pub settings: Vec<String>,
}

impl ConfigurationSummary {
    pub fn new(draft: &AutoPayDraft, today: Date) -> Result<Self> {
        Ok(Self {
            payment_date: draft
                .selected_date
                .map(format_long_date)
                .unwrap_or_else(|| "Not selected".to_string()),
            frequency: draft
                .frequency
                .map(|f| f.label().to_string())
                .unwrap_or_else(|| "Not selected".to_string()),
            payment_limit: format_currency(draft.payment_limit_amount().unwrap_or_default()),
            next_payment: next_payment_date(draft, today)?,
            is_complete: draft.selected_date.is_some()
                && draft.frequency.is_some()
                && draft.payment_limit.as_deref().is_some_and(|l| !l.is_empty()),
            settings: draft.advanced_settings.summary_lines(),
        })
    }
}

/// When the first automatic payment happens.
///
/// A selected date already behind `today` moves forward by one period.
pub fn next_payment_date(draft: &AutoPayDraft, today: Date) -> Result<Option<Date>> {
    let (Some(selected), Some(frequency)) = (draft.selected_date, draft.frequency) else {
        return Ok(None);
    };
    if selected < today {
        frequency.advance(selected).map(Some)
    } else {
        Ok(Some(selected))
    }
}

/// e.g. `Saturday, February 1, 2025`
pub fn format_long_date(date: Date) -> String {
    date.strftime("%A, %B %-d, %Y").to_string()
}
