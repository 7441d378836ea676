use crate::domain::bill::BillId;
use crate::domain::configuration::PersistedConfiguration;
use crate::domain::dashboard::{DASHBOARD_KEY, Dashboard};
use crate::domain::ports::{ConfigurationStore, DashboardStore};
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for per-bill AutoPay configurations.
pub const CF_CONFIGURATIONS: &str = "configurations";
/// Column Family for the aggregate dashboard record.
pub const CF_DASHBOARD: &str = "dashboard";

/// A persistent store implementation using RocksDB.
///
/// Configurations and the dashboard live in separate Column Families, stored
/// as JSON under the same keys the in-memory store uses. Every write is a
/// single `put`, which RocksDB applies atomically.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_configurations = ColumnFamilyDescriptor::new(CF_CONFIGURATIONS, Options::default());
        let cf_dashboard = ColumnFamilyDescriptor::new(CF_DASHBOARD, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_configurations, cf_dashboard])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.db.cf_handle(cf_name).ok_or_else(|| missing_cf(cf_name))?;

        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| WizardError::CorruptRecord {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.db.cf_handle(cf_name).ok_or_else(|| missing_cf(cf_name))?;

        let bytes = serde_json::to_vec(value).map_err(|e| {
            WizardError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(&cf, key.as_bytes(), bytes)?;
        Ok(())
    }
}

fn missing_cf(name: &str) -> WizardError {
    WizardError::InternalError(Box::new(std::io::Error::other(format!(
        "Column family '{}' not found",
        name
    ))))
}

#[async_trait]
impl ConfigurationStore for RocksDBStore {
    async fn get(&self, bill_id: &BillId) -> Result<Option<PersistedConfiguration>> {
        self.read(CF_CONFIGURATIONS, &PersistedConfiguration::storage_key(bill_id))
    }

    async fn put(&self, config: PersistedConfiguration) -> Result<()> {
        let key = PersistedConfiguration::storage_key(&config.bill_id);
        self.write(CF_CONFIGURATIONS, &key, &config)
    }
}

#[async_trait]
impl DashboardStore for RocksDBStore {
    async fn load(&self) -> Result<Option<Dashboard>> {
        self.read(CF_DASHBOARD, DASHBOARD_KEY)
    }

    async fn save(&self, dashboard: Dashboard) -> Result<()> {
        self.write(CF_DASHBOARD, DASHBOARD_KEY, &dashboard)
    }
}
