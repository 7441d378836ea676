use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a bill on the dashboard.
///
/// Bills are keyed by opaque strings; numeric ids from the dashboard are kept
/// in their textual form so that storage keys stay stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawBillId", into = "String")]
pub struct BillId(String);

/// Stored ids are either strings or bare JSON numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBillId {
    Text(String),
    Number(u64),
}

impl From<RawBillId> for BillId {
    fn from(raw: RawBillId) -> Self {
        match raw {
            RawBillId::Text(id) => Self(id),
            RawBillId::Number(id) => Self(id.to_string()),
        }
    }
}

impl From<BillId> for String {
    fn from(id: BillId) -> Self {
        id.0
    }
}

impl BillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BillId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BillId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The bill a wizard session is opened for, as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRef {
    pub id: BillId,
    pub display_name: String,
}

impl BillRef {
    pub fn new(id: impl Into<BillId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl Default for BillRef {
    /// Placeholder identity used when the caller did not name a bill.
    fn default() -> Self {
        Self::new("default", "Selected Service")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bill_ref_is_placeholder() {
        let bill = BillRef::default();
        assert_eq!(bill.id.as_str(), "default");
        assert_eq!(bill.display_name, "Selected Service");
    }

    #[test]
    fn test_bill_id_serializes_as_plain_string() {
        let id = BillId::from("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
        let parsed: BillId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_numeric_bill_id_is_read_as_text() {
        let parsed: BillId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, BillId::from("7"));
        assert!(serde_json::from_str::<BillId>("true").is_err());
    }
}
