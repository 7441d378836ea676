#![allow(dead_code)]

use async_trait::async_trait;
use autopay::application::wizard::{AutoPayWizard, WizardOptions};
use autopay::domain::bill::{BillId, BillRef};
use autopay::domain::configuration::PersistedConfiguration;
use autopay::domain::ports::ConfigurationStore;
use autopay::error::{Result, WizardError};
use autopay::infrastructure::in_memory::InMemoryStore;
use jiff::civil::{Date, date};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::NamedTempFile;

pub const TODAY: Date = date(2025, 1, 10);

pub fn options() -> WizardOptions {
    WizardOptions::default()
        .with_processing_delay(Duration::ZERO)
        .with_today(TODAY)
}

pub async fn open(store: &InMemoryStore, bill: BillRef) -> AutoPayWizard {
    AutoPayWizard::open(bill, Box::new(store.clone()), Box::new(store.clone()), options()).await
}

/// Writes a wizard script with an `action,value` header.
pub fn script(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action,value").unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Configuration store whose writes can be made to fail on demand.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    failing: Arc<AtomicBool>,
    writes: Arc<std::sync::atomic::AtomicUsize>,
}

impl FlakyStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigurationStore for FlakyStore {
    async fn get(&self, bill_id: &BillId) -> Result<Option<PersistedConfiguration>> {
        self.inner.get(bill_id).await
    }

    async fn put(&self, config: PersistedConfiguration) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(WizardError::IoError(std::io::Error::other("disk full")));
        }
        self.inner.put(config).await
    }
}
