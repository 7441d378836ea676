use crate::error::WizardError;
use std::fmt;

/// One screen of the AutoPay wizard, numbered 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Date = 1,
    Frequency = 2,
    Limit = 3,
    Advanced = 4,
    Review = 5,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Self::Date,
        Self::Frequency,
        Self::Limit,
        Self::Advanced,
        Self::Review,
    ];
    pub const FIRST: Step = Self::Date;
    pub const LAST: Step = Self::Review;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Date => "Payment Date",
            Self::Frequency => "Frequency",
            Self::Limit => "Payment Limit",
            Self::Advanced => "Advanced Settings",
            Self::Review => "Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Date => "Choose when to pay",
            Self::Frequency => "Set payment schedule",
            Self::Limit => "Set maximum amount",
            Self::Advanced => "Configure options",
            Self::Review => "Confirm settings",
        }
    }

    /// The following step, staying on the last one.
    pub fn next(self) -> Step {
        Step::try_from(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// The preceding step, staying on the first one.
    pub fn previous(self) -> Step {
        Step::try_from(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }
}

impl TryFrom<u8> for Step {
    type Error = WizardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|step| step.number() == n)
            .ok_or(WizardError::InvalidStep(n))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.number(), Self::LAST.number())
    }
}
