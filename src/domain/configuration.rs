use super::bill::BillId;
use super::draft::{AutoPayDraft, Frequency};
use super::settings::AdvancedSettings;
use super::validation::validate;
use crate::error::{Result, WizardError};
use jiff::Timestamp;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prefix of the per-bill record key.
pub const CONFIGURATION_KEY_PREFIX: &str = "autopay_";

/// A saved AutoPay configuration, one per bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfiguration {
    pub bill_id: BillId,
    pub selected_date: Date,
    pub frequency: Frequency,
    pub payment_limit: Decimal,
    #[serde(default)]
    pub advanced_settings: AdvancedSettings,
    pub created_at: Timestamp,
    pub is_active: bool,
}

impl PersistedConfiguration {
    /// Builds the record for a draft that passes validation.
    ///
    /// A draft that was hydrated from an earlier record keeps its original
    /// creation time, so re-saving an untouched draft yields an equal record.
    pub fn from_draft(draft: &AutoPayDraft, now: Timestamp) -> Result<Self> {
        let result = validate(draft);
        if !result.is_valid {
            return Err(WizardError::Incomplete(result.errors));
        }

        let (Some(selected_date), Some(frequency), Some(payment_limit)) = (
            draft.selected_date,
            draft.frequency,
            draft.payment_limit_amount(),
        ) else {
            return Err(WizardError::Incomplete(result.errors));
        };

        Ok(Self {
            bill_id: draft.bill_id().clone(),
            selected_date,
            frequency,
            payment_limit,
            advanced_settings: draft.advanced_settings,
            created_at: draft.created_at().unwrap_or(now),
            is_active: true,
        })
    }

    pub fn storage_key(bill_id: &BillId) -> String {
        format!("{}{}", CONFIGURATION_KEY_PREFIX, bill_id)
    }
}
