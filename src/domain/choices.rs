//! The options each wizard step offers, in the order they are presented.

use super::draft::{Frequency, PaymentLimit, SUGGESTED_LIMITS, format_currency};
use super::settings::{NotificationTiming, RetryAttempts};
use super::step::Step;

/// e.g. `Step 2 of 5: Frequency (Set payment schedule)`
pub fn step_heading(step: Step) -> String {
    format!("{}: {} ({})", step, step.title(), step.description())
}

pub fn step_choices(step: Step) -> Vec<String> {
    match step {
        Step::Date => vec!["Any date from today onwards".to_string()],
        Step::Frequency => Frequency::ALL
            .into_iter()
            .map(|f| {
                format!(
                    "{}: {}, about every {} days. {}",
                    f.as_str(),
                    f.label(),
                    f.interval_days(),
                    f.description()
                )
            })
            .collect(),
        Step::Limit => {
            let mut choices = vec![format!(
                "Any amount from {} to {}",
                format_currency(PaymentLimit::MIN),
                format_currency(PaymentLimit::MAX)
            )];
            choices.extend(
                SUGGESTED_LIMITS
                    .into_iter()
                    .map(|amount| format!("Suggested: {}", format_currency(amount))),
            );
            choices
        }
        Step::Advanced => {
            let retries = RetryAttempts::ALL.into_iter().map(|r| {
                format!("retryAttempts={}: {}", r.count(), r.description())
            });
            let timings = NotificationTiming::ALL
                .into_iter()
                .map(|t| format!("notificationTiming={}: {}", t.days(), t.label()));
            retries.chain(timings).collect()
        }
        Step::Review => vec!["Confirm the summary and save".to_string()],
    }
}
