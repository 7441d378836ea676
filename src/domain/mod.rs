//! Domain model of the AutoPay wizard: drafts, saved configurations, the
//! dashboard bill list and the storage ports they are persisted through.

pub mod bill;
pub mod choices;
pub mod configuration;
pub mod dashboard;
pub mod draft;
pub mod ports;
pub mod settings;
pub mod step;
pub mod summary;
pub mod validation;
