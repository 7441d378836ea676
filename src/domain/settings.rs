use crate::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many times a failed automatic payment is attempted in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetryAttempts {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[default]
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "5")]
    Five,
}

impl RetryAttempts {
    pub const ALL: [RetryAttempts; 4] = [Self::One, Self::Two, Self::Three, Self::Five];

    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::One => "Try once, then stop",
            Self::Two => "Retry once after 24 hours",
            Self::Three => "Retry twice with 24-hour intervals",
            Self::Five => "Maximum retry attempts over 5 days",
        }
    }
}

impl FromStr for RetryAttempts {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.count().to_string() == s.trim())
            .ok_or_else(|| {
                WizardError::ValidationError(format!(
                    "Retry attempts must be one of 1, 2, 3 or 5, got '{}'",
                    s
                ))
            })
    }
}

/// Lead time, in days, for payment reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationTiming {
    #[serde(rename = "1")]
    OneDay,
    #[default]
    #[serde(rename = "3")]
    ThreeDays,
    #[serde(rename = "7")]
    OneWeek,
    #[serde(rename = "14")]
    TwoWeeks,
}

impl NotificationTiming {
    pub const ALL: [NotificationTiming; 4] = [
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
        Self::TwoWeeks,
    ];

    pub fn days(self) -> u8 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1 day before",
            Self::ThreeDays => "3 days before",
            Self::OneWeek => "1 week before",
            Self::TwoWeeks => "2 weeks before",
        }
    }
}

impl FromStr for NotificationTiming {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.days().to_string() == s.trim())
            .ok_or_else(|| {
                WizardError::ValidationError(format!(
                    "Notification timing must be one of 1, 3, 7 or 14 days, got '{}'",
                    s
                ))
            })
    }
}

impl fmt::Display for NotificationTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Optional AutoPay behavior configured on step 4.
///
/// Every field defaults independently, so a stored record that only carries
/// some of the keys is completed with defaults on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedSettings {
    pub retry_attempts: RetryAttempts,
    pub notify_on_retry: bool,
    pub auto_disable_on_failure: bool,
    pub notification_timing: NotificationTiming,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub in_app_notifications: bool,
    pub require_confirmation: bool,
    pub pause_on_suspicious_activity: bool,
    #[serde(rename = "require2FA")]
    pub require_2fa: bool,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            retry_attempts: RetryAttempts::Three,
            notify_on_retry: true,
            auto_disable_on_failure: true,
            notification_timing: NotificationTiming::ThreeDays,
            email_notifications: true,
            sms_notifications: false,
            in_app_notifications: true,
            require_confirmation: true,
            pause_on_suspicious_activity: true,
            require_2fa: false,
        }
    }
}

impl AdvancedSettings {
    /// Sets a single option by its stored key, e.g. `smsNotifications`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "retryAttempts" => self.retry_attempts = value.parse()?,
            "notificationTiming" => self.notification_timing = value.parse()?,
            "notifyOnRetry" => self.notify_on_retry = parse_flag(key, value)?,
            "autoDisableOnFailure" => self.auto_disable_on_failure = parse_flag(key, value)?,
            "emailNotifications" => self.email_notifications = parse_flag(key, value)?,
            "smsNotifications" => self.sms_notifications = parse_flag(key, value)?,
            "inAppNotifications" => self.in_app_notifications = parse_flag(key, value)?,
            "requireConfirmation" => self.require_confirmation = parse_flag(key, value)?,
            "pauseOnSuspiciousActivity" => {
                self.pause_on_suspicious_activity = parse_flag(key, value)?
            }
            "require2FA" => self.require_2fa = parse_flag(key, value)?,
            _ => {
                return Err(WizardError::ValidationError(format!(
                    "Unknown setting '{}'",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Plain-language recap shown at the bottom of the settings panel.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Retry failed payments up to {} times",
                self.retry_attempts.count()
            ),
            format!("Notify {} days before payments", self.notification_timing),
            format!(
                "{} and {} notifications enabled",
                if self.email_notifications {
                    "Email"
                } else {
                    "No email"
                },
                if self.sms_notifications { "SMS" } else { "no SMS" }
            ),
            if self.require_2fa {
                "Two-factor authentication required".to_string()
            } else {
                "Standard authentication".to_string()
            },
        ]
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        WizardError::ValidationError(format!(
            "Setting '{}' expects true or false, got '{}'",
            key, value
        ))
    })
}
