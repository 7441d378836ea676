use super::wizard::{AutoPayWizard, WizardExit};
use crate::error::{Result, WizardError};
use jiff::civil::Date;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Date,
    ClearDate,
    Frequency,
    Limit,
    Setting,
    Next,
    Previous,
    Goto,
    Save,
    Cancel,
}

/// One scripted user interaction with the wizard.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct WizardAction {
    pub action: ActionKind,
    #[serde(default)]
    pub value: Option<String>,
}

impl WizardAction {
    pub fn new(action: ActionKind, value: Option<&str>) -> Self {
        Self {
            action,
            value: value.map(str::to_string),
        }
    }

    fn required_value(&self) -> Result<&str> {
        self.value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                WizardError::ValidationError(format!(
                    "Action '{:?}' requires a value",
                    self.action
                ))
            })
    }
}

impl AutoPayWizard {
    /// Applies a scripted action.
    ///
    /// Returns the exit when the action closes the wizard. A cancel only
    /// reports the exit; the caller drops the wizard, discarding the draft.
    pub async fn perform(&mut self, action: &WizardAction) -> Result<Option<WizardExit>> {
        match action.action {
            ActionKind::Date => {
                let value = action.required_value()?;
                let date: Date = value.trim().parse().map_err(|_| {
                    WizardError::ValidationError(format!("'{}' is not a date (YYYY-MM-DD)", value))
                })?;
                self.select_date(date)?;
            }
            ActionKind::ClearDate => self.clear_date(),
            ActionKind::Frequency => self.set_frequency(action.required_value()?.parse()?),
            // An empty limit clears the field.
            ActionKind::Limit => self.set_payment_limit(action.value.as_deref().unwrap_or(""))?,
            ActionKind::Setting => {
                let value = action.required_value()?;
                let (key, setting) = value.split_once('=').ok_or_else(|| {
                    WizardError::ValidationError(format!("Expected key=value, got '{}'", value))
                })?;
                self.apply_setting(key.trim(), setting.trim())?;
            }
            ActionKind::Next => {
                self.next();
            }
            ActionKind::Previous => {
                self.previous();
            }
            ActionKind::Goto => {
                let value = action.required_value()?;
                let n: u8 = value.trim().parse().map_err(|_| {
                    WizardError::ValidationError(format!("'{}' is not a step number", value))
                })?;
                self.go_to_step(n)?;
            }
            ActionKind::Save => return self.save().await.map(Some),
            ActionKind::Cancel => return Ok(Some(WizardExit::Cancelled)),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::wizard::WizardOptions;
    use crate::domain::bill::{BillId, BillRef};
    use crate::domain::draft::Frequency;
    use crate::domain::ports::ConfigurationStore;
    use crate::domain::step::Step;
    use crate::infrastructure::in_memory::InMemoryStore;
    use jiff::civil::date;
    use std::time::Duration;

    async fn wizard(store: &InMemoryStore) -> AutoPayWizard {
        AutoPayWizard::open(
            BillRef::new("5", "Phone Service"),
            Box::new(store.clone()),
            Box::new(store.clone()),
            WizardOptions::default()
                .with_processing_delay(Duration::ZERO)
                .with_today(date(2025, 1, 1)),
        )
        .await
    }

    #[tokio::test]
    async fn test_scripted_session_saves() {
        let store = InMemoryStore::new();
        let mut wizard = wizard(&store).await;

        let script = [
            WizardAction::new(ActionKind::Date, Some("2025-03-15")),
            WizardAction::new(ActionKind::Next, None),
            WizardAction::new(ActionKind::Frequency, Some("quarterly")),
            WizardAction::new(ActionKind::Next, None),
            WizardAction::new(ActionKind::Limit, Some("$300")),
            WizardAction::new(ActionKind::Setting, Some("retryAttempts=5")),
            WizardAction::new(ActionKind::Goto, Some("5")),
        ];
        for action in &script {
            assert_eq!(wizard.perform(action).await.unwrap(), None);
        }
        assert_eq!(wizard.current_step(), Step::Review);

        let exit = wizard
            .perform(&WizardAction::new(ActionKind::Save, None))
            .await
            .unwrap();
        assert!(matches!(exit, Some(WizardExit::Saved { .. })));

        let config = store.get(&BillId::from("5")).await.unwrap().unwrap();
        assert_eq!(config.frequency, Frequency::Quarterly);
        assert_eq!(config.advanced_settings.retry_attempts.count(), 5);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_values() {
        let store = InMemoryStore::new();
        let mut wizard = wizard(&store).await;

        for action in [
            WizardAction::new(ActionKind::Date, None),
            WizardAction::new(ActionKind::Date, Some("tomorrow")),
            WizardAction::new(ActionKind::Goto, Some("x")),
            WizardAction::new(ActionKind::Setting, Some("require2FA")),
            WizardAction::new(ActionKind::Frequency, Some("weekly")),
        ] {
            assert!(wizard.perform(&action).await.is_err(), "{:?}", action);
        }
    }

    #[tokio::test]
    async fn test_cancel_reports_exit() {
        let store = InMemoryStore::new();
        let mut wizard = wizard(&store).await;

        let exit = wizard
            .perform(&WizardAction::new(ActionKind::Cancel, None))
            .await
            .unwrap();
        assert_eq!(exit, Some(WizardExit::Cancelled));
    }
}
