use super::bill::BillId;
use super::configuration::PersistedConfiguration;
use super::settings::AdvancedSettings;
use crate::error::{Result, WizardError};
use jiff::civil::Date;
use jiff::{Timestamp, ToSpan};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often an AutoPay payment recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Self::Monthly, Self::Quarterly, Self::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Monthly => "Payment will be processed every month on the selected date",
            Self::Quarterly => "Payment will be processed every 3 months on the selected date",
            Self::Yearly => "Payment will be processed once a year on the selected date",
        }
    }

    /// Approximate interval shown next to the option.
    pub fn interval_days(self) -> u16 {
        match self {
            Self::Monthly => 30,
            Self::Quarterly => 90,
            Self::Yearly => 365,
        }
    }

    /// The date one period after `date`. Month ends are clamped, so
    /// January 31 advances to the last day of February.
    pub fn advance(self, date: Date) -> Result<Date> {
        let step = match self {
            Self::Monthly => 1.month(),
            Self::Quarterly => 3.months(),
            Self::Yearly => 1.year(),
        };
        date.checked_add(step)
            .map_err(|e| WizardError::InternalError(Box::new(e)))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WizardError::ValidationError(format!(
                    "Frequency must be monthly, quarterly or yearly, got '{}'",
                    s
                ))
            })
    }
}

/// Quick-pick amounts offered next to the limit input.
pub const SUGGESTED_LIMITS: [Decimal; 5] = [dec!(50), dec!(100), dec!(250), dec!(500), dec!(1000)];

/// A payment limit accepted by the limit input.
///
/// Ensures the amount is within the range a single automatic payment may
/// reach: at least 1.00 and at most 10,000.00.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PaymentLimit(Decimal);

impl PaymentLimit {
    pub const MIN: Decimal = dec!(1.00);
    pub const MAX: Decimal = dec!(10000.00);

    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            Err(WizardError::ValidationError(
                "Please enter a valid amount greater than $0".to_string(),
            ))
        } else if value < Self::MIN {
            Err(WizardError::ValidationError(
                "Minimum payment limit is $1.00".to_string(),
            ))
        } else if value > Self::MAX {
            Err(WizardError::ValidationError(
                "Maximum payment limit is $10,000.00".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    /// Parses user input such as `$1,250.50`.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = parse_currency(input);
        if !is_plain_number(&raw) {
            return Err(WizardError::ValidationError(format!(
                "'{}' is not a valid amount",
                input.trim()
            )));
        }
        let value = Decimal::from_str(&raw).map_err(|_| {
            WizardError::ValidationError("Please enter a valid amount greater than $0".to_string())
        })?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PaymentLimit {
    type Error = WizardError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PaymentLimit> for Decimal {
    fn from(limit: PaymentLimit) -> Self {
        limit.0
    }
}

/// Strips currency decoration (`$` and thousands separators) from input.
pub fn parse_currency(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect()
}

// Digits with at most one decimal point.
fn is_plain_number(s: &str) -> bool {
    let mut seen_point = false;
    for c in s.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    true
}

/// Formats an amount as US dollars with two decimals, e.g. `$1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// In-progress AutoPay configuration for one bill.
///
/// Fields are public so that step views can render them; writes go through
/// the wizard controller, which owns the draft for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPayDraft {
    bill_id: BillId,
    pub selected_date: Option<Date>,
    pub frequency: Option<Frequency>,
    /// Raw amount text as entered; may be empty or non-numeric.
    pub payment_limit: Option<String>,
    pub advanced_settings: AdvancedSettings,
    created_at: Option<Timestamp>,
}

impl AutoPayDraft {
    pub fn new(bill_id: BillId) -> Self {
        Self {
            bill_id,
            selected_date: None,
            frequency: None,
            payment_limit: None,
            advanced_settings: AdvancedSettings::default(),
            created_at: None,
        }
    }

    /// Rebuilds a draft from a stored configuration.
    pub fn from_configuration(config: &PersistedConfiguration) -> Self {
        Self {
            bill_id: config.bill_id.clone(),
            selected_date: Some(config.selected_date),
            frequency: Some(config.frequency),
            payment_limit: Some(config.payment_limit.to_string()),
            advanced_settings: config.advanced_settings,
            created_at: Some(config.created_at),
        }
    }

    pub fn bill_id(&self) -> &BillId {
        &self.bill_id
    }

    /// Creation time of the record this draft was hydrated from, if any.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    /// The entered limit as a number, if it parses at all.
    pub fn payment_limit_amount(&self) -> Option<Decimal> {
        let raw = parse_currency(self.payment_limit.as_deref()?);
        if raw.is_empty() || !is_plain_number(&raw) {
            return None;
        }
        Decimal::from_str(&raw).ok()
    }

    /// True when the entered limit is a number greater than zero.
    pub fn has_positive_limit(&self) -> bool {
        self.payment_limit_amount()
            .is_some_and(|amount| amount > Decimal::ZERO)
    }
}
