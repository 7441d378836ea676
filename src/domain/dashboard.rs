use super::bill::BillId;
use crate::error::{Result, WizardError};
use jiff::civil::{Date, date};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Key of the aggregate bill-list record.
pub const DASHBOARD_KEY: &str = "dashboardData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Pending,
    Paid,
    #[serde(rename = "AutoPay Enabled")]
    AutoPayEnabled,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::AutoPayEnabled => "AutoPay Enabled",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub provider: String,
    pub account_number: String,
    pub amount: Decimal,
    pub due_date: Date,
    pub status: BillStatus,
    #[serde(default)]
    pub auto_pay_enabled: bool,
    /// Fields this crate does not model, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bill {
    /// A pending bill whose due date has passed.
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status == BillStatus::Pending && self.due_date < today
    }
}

/// Which bills the dashboard list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillFilter {
    #[default]
    All,
    Pending,
    Paid,
    AutoPay,
}

impl BillFilter {
    pub fn matches(self, bill: &Bill) -> bool {
        match self {
            Self::All => true,
            Self::Pending => bill.status == BillStatus::Pending,
            Self::Paid => bill.status == BillStatus::Paid,
            Self::AutoPay => bill.status == BillStatus::AutoPayEnabled,
        }
    }
}

impl FromStr for BillFilter {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "autopay" => Ok(Self::AutoPay),
            other => Err(WizardError::ValidationError(format!(
                "Unknown bill filter '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillCounts {
    pub all: usize,
    pub pending: usize,
    pub paid: usize,
    pub autopay: usize,
}

impl fmt::Display for BillCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "All: {}, Pending: {}, Paid: {}, AutoPay: {}",
            self.all, self.pending, self.paid, self.autopay
        )
    }
}

/// The bill list shown on the dashboard.
///
/// Other parts of the record, such as notifications, are carried in `extra`
/// so that patching a bill rewrites them unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dashboard {
    pub fn new(bills: Vec<Bill>) -> Self {
        Self {
            bills,
            extra: Map::new(),
        }
    }

    /// Demo bill list used to seed an empty store.
    pub fn sample() -> Self {
        let bill = |id: &str,
                    provider: &str,
                    account: &str,
                    amount: Decimal,
                    due: Date,
                    status: BillStatus| Bill {
            id: BillId::from(id),
            provider: provider.to_string(),
            account_number: account.to_string(),
            amount,
            due_date: due,
            status,
            auto_pay_enabled: status == BillStatus::AutoPayEnabled,
            extra: Map::new(),
        };

        Self::new(vec![
            bill("1", "Electric Company", "****1234", dec!(125.50), date(2025, 1, 15), BillStatus::Pending),
            bill("2", "Water Utility", "****5678", dec!(89.25), date(2025, 1, 18), BillStatus::Pending),
            bill("3", "Internet Provider", "****9012", dec!(79.99), date(2025, 1, 20), BillStatus::AutoPayEnabled),
            bill("4", "Gas Company", "****3456", dec!(156.75), date(2024, 12, 28), BillStatus::Pending),
            bill("5", "Phone Service", "****7890", dec!(65.00), date(2024, 12, 30), BillStatus::Paid),
            bill("6", "Insurance", "****2468", dec!(245.00), date(2025, 1, 25), BillStatus::AutoPayEnabled),
            bill("7", "Credit Card", "****1357", dec!(320.45), date(2025, 1, 12), BillStatus::Pending),
            bill("8", "Mortgage", "****9753", dec!(1850.00), date(2025, 1, 1), BillStatus::Paid),
        ])
    }

    pub fn get(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|bill| &bill.id == id)
    }

    pub fn filtered(&self, filter: BillFilter) -> impl Iterator<Item = &Bill> {
        self.bills.iter().filter(move |bill| filter.matches(bill))
    }

    pub fn counts(&self) -> BillCounts {
        let count = |filter: BillFilter| self.filtered(filter).count();
        BillCounts {
            all: self.bills.len(),
            pending: count(BillFilter::Pending),
            paid: count(BillFilter::Paid),
            autopay: count(BillFilter::AutoPay),
        }
    }

    /// Marks a single bill as paid. Returns false if the bill is unknown.
    pub fn pay(&mut self, id: &BillId) -> bool {
        match self.bills.iter_mut().find(|bill| &bill.id == id) {
            Some(bill) => {
                bill.status = BillStatus::Paid;
                true
            }
            None => false,
        }
    }

    /// Pays every pending bill at once and returns the total paid.
    pub fn pay_all_pending(&mut self) -> Decimal {
        self.bills
            .iter_mut()
            .filter(|bill| bill.status == BillStatus::Pending)
            .map(|bill| {
                bill.status = BillStatus::Paid;
                bill.amount
            })
            .sum()
    }

    /// Flags a bill as paid by AutoPay. Returns false if the bill is unknown.
    pub fn enable_auto_pay(&mut self, id: &BillId) -> bool {
        match self.bills.iter_mut().find(|bill| &bill.id == id) {
            Some(bill) => {
                bill.auto_pay_enabled = true;
                bill.status = BillStatus::AutoPayEnabled;
                true
            }
            None => false,
        }
    }
}
