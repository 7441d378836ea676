use crate::domain::bill::{BillId, BillRef};
use crate::domain::configuration::PersistedConfiguration;
use crate::domain::draft::{AutoPayDraft, Frequency, PaymentLimit};
use crate::domain::ports::{ConfigurationStoreBox, DashboardStoreBox};
use crate::domain::settings::AdvancedSettings;
use crate::domain::step::Step;
use crate::domain::summary::ConfigurationSummary;
use crate::domain::validation::{ValidationErrors, ValidationResult, validate};
use crate::error::{Result, WizardError};
use jiff::civil::Date;
use jiff::{Timestamp, Zoned};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::time::Duration;

/// Message shown when a valid configuration could not be written.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save configuration. Please try again.";

/// Tunables for a wizard session.
#[derive(Debug, Clone)]
pub struct WizardOptions {
    /// Simulated network latency before the configuration is written.
    pub processing_delay: Duration,
    /// Overrides the current date used to reject past payment dates.
    pub today: Option<Date>,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_secs(2),
            today: None,
        }
    }
}

impl WizardOptions {
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }
}

/// Where control goes once the wizard closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardExit {
    /// Back to the bill list with a confirmation message.
    Saved {
        bill_id: BillId,
        message: String,
        configuration: PersistedConfiguration,
    },
    /// Back to the bill list without a message.
    Cancelled,
}

impl WizardExit {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Saved { message, .. } => Some(message),
            Self::Cancelled => None,
        }
    }
}

/// Controller for the five-step AutoPay configuration wizard.
///
/// `AutoPayWizard` owns the draft for the whole session along with the
/// stores it is loaded from and saved to. Navigation is free: any step can be
/// visited at any time, and completion of a step only informs the caller
/// (see [`AutoPayWizard::can_proceed`]).
///
/// `save` borrows the wizard mutably, so at most one save is in flight and
/// nothing else can touch the draft until it has finished.
pub struct AutoPayWizard {
    bill: BillRef,
    draft: AutoPayDraft,
    current_step: Step,
    visible_errors: ValidationErrors,
    today: Date,
    options: WizardOptions,
    configurations: ConfigurationStoreBox,
    dashboard: DashboardStoreBox,
}

impl AutoPayWizard {
    /// Opens the wizard for `bill` on the first step.
    ///
    /// The draft is hydrated from the stored configuration for the bill when
    /// one exists. Unreadable or mismatched records are logged and replaced
    /// by a fresh draft with default settings.
    pub async fn open(
        bill: BillRef,
        configurations: ConfigurationStoreBox,
        dashboard: DashboardStoreBox,
        options: WizardOptions,
    ) -> Self {
        let draft = match configurations.get(&bill.id).await {
            Ok(Some(config)) if config.bill_id == bill.id => {
                debug!("Hydrating AutoPay draft for bill {}", bill.id);
                AutoPayDraft::from_configuration(&config)
            }
            Ok(Some(config)) => {
                warn!(
                    "Stored configuration for bill {} names bill {}, using defaults",
                    bill.id, config.bill_id
                );
                AutoPayDraft::new(bill.id.clone())
            }
            Ok(None) => AutoPayDraft::new(bill.id.clone()),
            Err(e) => {
                warn!(
                    "Error loading existing configuration for bill {}: {}",
                    bill.id, e
                );
                AutoPayDraft::new(bill.id.clone())
            }
        };

        let today = options.today.unwrap_or_else(|| Zoned::now().date());

        Self {
            bill,
            draft,
            current_step: Step::FIRST,
            visible_errors: ValidationErrors::new(),
            today,
            options,
            configurations,
            dashboard,
        }
    }

    pub fn bill(&self) -> &BillRef {
        &self.bill
    }

    pub fn draft(&self) -> &AutoPayDraft {
        &self.draft
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Errors surfaced by the last explicit save attempt.
    pub fn visible_errors(&self) -> &ValidationErrors {
        &self.visible_errors
    }

    /// Validates the current draft without touching the visible errors.
    pub fn validation(&self) -> ValidationResult {
        validate(&self.draft)
    }

    pub fn is_valid(&self) -> bool {
        self.validation().is_valid
    }

    /// Validates the draft and publishes the result as the visible errors.
    pub fn validate_and_set_errors(&mut self) -> bool {
        let result = validate(&self.draft);
        self.visible_errors = result.errors;
        result.is_valid
    }

    /// Whether step `n` has what it needs. Unknown step numbers are never
    /// complete.
    pub fn is_step_complete(&self, n: u8) -> bool {
        let Ok(step) = Step::try_from(n) else {
            return false;
        };
        match step {
            Step::Date => self.draft.selected_date.is_some(),
            Step::Frequency => self.draft.frequency.is_some(),
            Step::Limit => self.draft.has_positive_limit(),
            Step::Advanced => true,
            Step::Review => {
                self.draft.selected_date.is_some()
                    && self.draft.frequency.is_some()
                    && self.draft.payment_limit.is_some()
            }
        }
    }

    /// Whether the UI should enable the Next control.
    pub fn can_proceed(&self) -> bool {
        self.is_step_complete(self.current_step.number())
    }

    /// Jumps to step `n`. Numbers outside 1..=5 are rejected and the current
    /// step is kept.
    pub fn go_to_step(&mut self, n: u8) -> Result<Step> {
        let step = Step::try_from(n)?;
        debug!("Wizard for bill {}: {} -> {}", self.bill.id, self.current_step, step);
        self.current_step = step;
        Ok(step)
    }

    pub fn next(&mut self) -> Step {
        self.current_step = self.current_step.next();
        self.current_step
    }

    pub fn previous(&mut self) -> Step {
        self.current_step = self.current_step.previous();
        self.current_step
    }

    /// Picks the payment date. Dates before today are refused.
    pub fn select_date(&mut self, date: Date) -> Result<()> {
        if date < self.today {
            return Err(WizardError::ValidationError(format!(
                "Payment date {} is in the past",
                date
            )));
        }
        self.draft.selected_date = Some(date);
        Ok(())
    }

    pub fn clear_date(&mut self) {
        self.draft.selected_date = None;
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.draft.frequency = Some(frequency);
    }

    /// Sets the limit from user input such as `$250` or `1,000.00`.
    ///
    /// Empty input clears the limit. Input that is not an amount between
    /// $1.00 and $10,000.00 is refused and the draft keeps its previous value.
    pub fn set_payment_limit(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            self.draft.payment_limit = None;
            return Ok(());
        }
        let limit = PaymentLimit::parse(input)?;
        self.draft.payment_limit = Some(limit.value().to_string());
        Ok(())
    }

    /// Sets the limit to one of the suggested amounts or any other value.
    pub fn set_payment_limit_amount(&mut self, amount: Decimal) -> Result<()> {
        let limit = PaymentLimit::new(amount)?;
        self.draft.payment_limit = Some(limit.value().to_string());
        Ok(())
    }

    /// Replaces all advanced options at once.
    pub fn update_settings(&mut self, settings: AdvancedSettings) {
        self.draft.advanced_settings = settings;
    }

    /// Changes one advanced option by its stored key.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.draft.advanced_settings.apply(key, value)
    }

    pub fn summary(&self) -> Result<ConfigurationSummary> {
        ConfigurationSummary::new(&self.draft, self.today)
    }

    /// Validates and persists the draft.
    ///
    /// An incomplete draft publishes its field errors and is rejected with
    /// [`WizardError::Incomplete`] before anything is written. A storage
    /// failure publishes a single general error and is returned as is; the
    /// wizard stays usable and the caller may simply call `save` again.
    pub async fn save(&mut self) -> Result<WizardExit> {
        if !self.validate_and_set_errors() {
            return Err(WizardError::Incomplete(self.visible_errors.clone()));
        }

        if !self.options.processing_delay.is_zero() {
            tokio::time::sleep(self.options.processing_delay).await;
        }

        match self.persist().await {
            Ok(configuration) => {
                info!("AutoPay configured for bill {}", self.bill.id);
                self.visible_errors = ValidationErrors::new();
                Ok(WizardExit::Saved {
                    bill_id: self.bill.id.clone(),
                    configuration,
                    message: format!(
                        "AutoPay successfully configured for {}",
                        self.bill.display_name
                    ),
                })
            }
            Err(e) => {
                error!("Error saving configuration for bill {}: {}", self.bill.id, e);
                self.visible_errors = ValidationErrors::general(SAVE_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    /// Closes the wizard, dropping the draft without touching the stores.
    pub fn cancel(self) -> WizardExit {
        debug!("AutoPay wizard for bill {} cancelled", self.bill.id);
        WizardExit::Cancelled
    }

    async fn persist(&self) -> Result<PersistedConfiguration> {
        let config = PersistedConfiguration::from_draft(&self.draft, Timestamp::now())?;
        self.configurations.put(config.clone()).await?;

        // The bill list is patched in place; a missing list or bill is fine.
        let dashboard = match self.dashboard.load().await {
            Ok(dashboard) => dashboard,
            Err(e @ WizardError::CorruptRecord { .. }) => {
                warn!("Skipping bill list update for bill {}: {}", self.bill.id, e);
                None
            }
            Err(e) => return Err(e),
        };
        if let Some(mut dashboard) = dashboard
            && dashboard.enable_auto_pay(&self.bill.id)
        {
            self.dashboard.save(dashboard).await?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{BillStatus, Dashboard};
    use crate::domain::ports::{ConfigurationStore, DashboardStore};
    use crate::domain::validation::Field;
    use crate::infrastructure::in_memory::InMemoryStore;
    use jiff::civil::date;
    use rust_decimal_macros::dec;

    async fn open_wizard(store: &InMemoryStore, bill: BillRef) -> AutoPayWizard {
        AutoPayWizard::open(
            bill,
            Box::new(store.clone()),
            Box::new(store.clone()),
            WizardOptions::default()
                .with_processing_delay(Duration::ZERO)
                .with_today(date(2025, 1, 10)),
        )
        .await
    }

    #[tokio::test]
    async fn test_opens_on_first_step_with_defaults() {
        let store = InMemoryStore::new();
        let wizard = open_wizard(&store, BillRef::default()).await;

        assert_eq!(wizard.current_step(), Step::Date);
        assert_eq!(wizard.draft().bill_id(), &BillId::from("default"));
        assert_eq!(wizard.draft().advanced_settings, AdvancedSettings::default());
        assert!(wizard.visible_errors().is_empty());
        assert!(!wizard.is_valid());
    }

    #[tokio::test]
    async fn test_navigation_clamps_at_both_ends() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        assert_eq!(wizard.previous(), Step::Date);
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.current_step(), Step::Review);
        assert_eq!(wizard.next(), Step::Review);
    }

    #[tokio::test]
    async fn test_go_to_step_rejects_out_of_range() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        assert_eq!(wizard.go_to_step(4).unwrap(), Step::Advanced);
        assert!(matches!(wizard.go_to_step(0), Err(WizardError::InvalidStep(0))));
        assert!(matches!(wizard.go_to_step(6), Err(WizardError::InvalidStep(6))));
        assert_eq!(wizard.current_step(), Step::Advanced);
    }

    #[tokio::test]
    async fn test_next_is_not_gated_by_completion() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        assert!(!wizard.can_proceed());
        assert_eq!(wizard.next(), Step::Frequency);
    }

    #[tokio::test]
    async fn test_step_completion() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        assert!(!wizard.is_step_complete(1));
        assert!(!wizard.is_step_complete(2));
        assert!(!wizard.is_step_complete(3));
        assert!(wizard.is_step_complete(4));
        assert!(!wizard.is_step_complete(5));
        assert!(!wizard.is_step_complete(0));
        assert!(!wizard.is_step_complete(9));

        wizard.select_date(date(2025, 2, 1)).unwrap();
        wizard.set_frequency(Frequency::Monthly);
        wizard.set_payment_limit("100").unwrap();

        for n in 1..=5 {
            assert!(wizard.is_step_complete(n), "step {} should be complete", n);
        }
    }

    #[tokio::test]
    async fn test_select_date_refuses_past() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        assert!(wizard.select_date(date(2025, 1, 9)).is_err());
        assert_eq!(wizard.draft().selected_date, None);

        wizard.select_date(date(2025, 1, 10)).unwrap();
        assert_eq!(wizard.draft().selected_date, Some(date(2025, 1, 10)));

        wizard.clear_date();
        assert_eq!(wizard.draft().selected_date, None);
    }

    #[tokio::test]
    async fn test_limit_entry_keeps_previous_value_on_rejection() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        wizard.set_payment_limit("$1,000").unwrap();
        assert_eq!(wizard.draft().payment_limit_amount(), Some(dec!(1000)));

        assert!(wizard.set_payment_limit("0.50").is_err());
        assert!(wizard.set_payment_limit("20000").is_err());
        assert!(wizard.set_payment_limit("ten").is_err());
        assert_eq!(wizard.draft().payment_limit_amount(), Some(dec!(1000)));

        wizard.set_payment_limit_amount(dec!(250)).unwrap();
        assert_eq!(wizard.draft().payment_limit_amount(), Some(dec!(250)));

        wizard.set_payment_limit("").unwrap();
        assert_eq!(wizard.draft().payment_limit, None);
    }

    #[tokio::test]
    async fn test_pure_validation_does_not_surface_errors() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        assert!(!wizard.validation().is_valid);
        assert!(wizard.visible_errors().is_empty());

        assert!(!wizard.validate_and_set_errors());
        assert_eq!(wizard.visible_errors().len(), 3);
    }

    #[tokio::test]
    async fn test_save_writes_configuration_and_patches_dashboard() {
        let store = InMemoryStore::new();
        store.save(Dashboard::sample()).await.unwrap();

        let mut wizard = open_wizard(&store, BillRef::new("2", "Water Utility")).await;
        wizard.select_date(date(2025, 2, 1)).unwrap();
        wizard.set_frequency(Frequency::Monthly);
        wizard.set_payment_limit("100").unwrap();
        wizard.apply_setting("smsNotifications", "true").unwrap();

        let exit = wizard.save().await.unwrap();
        assert_eq!(
            exit.message(),
            Some("AutoPay successfully configured for Water Utility")
        );

        let config = store.get(&BillId::from("2")).await.unwrap().unwrap();
        assert!(config.is_active);
        assert_eq!(config.frequency, Frequency::Monthly);
        assert_eq!(config.payment_limit, dec!(100));
        assert!(config.advanced_settings.sms_notifications);

        let dashboard = store.load().await.unwrap().unwrap();
        let bill = dashboard.get(&BillId::from("2")).unwrap();
        assert_eq!(bill.status, BillStatus::AutoPayEnabled);
        assert!(bill.auto_pay_enabled);
        // Other bills are left alone.
        assert_eq!(
            dashboard.get(&BillId::from("1")).unwrap().status,
            BillStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_save_without_dashboard_record() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::new("42", "Gym")).await;
        wizard.select_date(date(2025, 2, 1)).unwrap();
        wizard.set_frequency(Frequency::Yearly);
        wizard.set_payment_limit("60").unwrap();

        wizard.save().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(store.get(&BillId::from("42")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_save_writes_nothing() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::new("1", "Electric Company")).await;
        wizard.set_frequency(Frequency::Monthly);
        wizard.set_payment_limit("100").unwrap();

        let result = wizard.save().await;
        assert!(matches!(
            result,
            Err(WizardError::Incomplete(ref errors)) if errors.contains(Field::Date)
        ));
        assert_eq!(
            wizard.visible_errors().get(Field::Date),
            Some("Please select a payment date")
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_settings_replaces_all_options() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;

        let settings = AdvancedSettings {
            require_2fa: true,
            email_notifications: false,
            ..AdvancedSettings::default()
        };
        wizard.update_settings(settings);
        assert_eq!(wizard.draft().advanced_settings, settings);
    }

    #[tokio::test]
    async fn test_unreadable_dashboard_does_not_fail_save() {
        let store = InMemoryStore::new();
        store.insert_raw("dashboardData", "{\"bills\": [oops").await;

        let mut wizard = open_wizard(&store, BillRef::new("1", "Electric Company")).await;
        wizard.select_date(date(2025, 2, 1)).unwrap();
        wizard.set_frequency(Frequency::Monthly);
        wizard.set_payment_limit("100").unwrap();

        assert!(wizard.save().await.is_ok());
        assert!(wizard.visible_errors().is_empty());
        assert!(store.get(&BillId::from("1")).await.unwrap().is_some());
        // The unreadable record is left as it was.
        assert_eq!(
            store.raw("dashboardData").await.unwrap(),
            b"{\"bills\": [oops".to_vec()
        );
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back_to_defaults() {
        let store = InMemoryStore::new();
        store.insert_raw("autopay_1", "{\"billId\": 1, broken").await;

        let wizard = open_wizard(&store, BillRef::new("1", "Electric Company")).await;
        assert_eq!(wizard.draft(), &AutoPayDraft::new(BillId::from("1")));
    }

    #[tokio::test]
    async fn test_cancel_leaves_store_untouched() {
        let store = InMemoryStore::new();
        let mut wizard = open_wizard(&store, BillRef::default()).await;
        wizard.select_date(date(2025, 2, 1)).unwrap();

        assert_eq!(wizard.cancel(), WizardExit::Cancelled);
        assert!(store.is_empty().await);
    }
}
