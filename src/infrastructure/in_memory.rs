use crate::domain::bill::BillId;
use crate::domain::configuration::PersistedConfiguration;
use crate::domain::dashboard::{DASHBOARD_KEY, Dashboard};
use crate::domain::ports::{ConfigurationStore, DashboardStore};
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store holding JSON records.
///
/// Records are kept serialized under the same keys the persistent backend
/// uses (`autopay_<billId>` and `dashboardData`), so malformed data behaves
/// the same way in both. Cloning shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes raw bytes under `key`, bypassing serialization.
    pub async fn insert_raw(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let mut records = self.records.write().await;
        records.insert(key.into(), bytes.into());
    }

    /// Returns the raw bytes stored under `key`.
    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        let records = self.records.read().await;
        records.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let records = self.records.read().await;
        match records.get(key) {
            Some(bytes) => serde_json::from_slice(bytes)
                .map(Some)
                .map_err(|source| WizardError::CorruptRecord {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + Sync>(&self, key: String, value: &T) -> Result<()> {
        // Serialize before taking the lock so a failure leaves the old record.
        let bytes = serde_json::to_vec(value)
            .map_err(|e| WizardError::InternalError(Box::new(e)))?;
        let mut records = self.records.write().await;
        records.insert(key, bytes);
        Ok(())
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryStore {
    async fn get(&self, bill_id: &BillId) -> Result<Option<PersistedConfiguration>> {
        self.read(&PersistedConfiguration::storage_key(bill_id))
            .await
    }

    async fn put(&self, config: PersistedConfiguration) -> Result<()> {
        self.write(PersistedConfiguration::storage_key(&config.bill_id), &config)
            .await
    }
}

#[async_trait]
impl DashboardStore for InMemoryStore {
    async fn load(&self) -> Result<Option<Dashboard>> {
        self.read(DASHBOARD_KEY).await
    }

    async fn save(&self, dashboard: Dashboard) -> Result<()> {
        self.write(DASHBOARD_KEY.to_string(), &dashboard).await
    }
}
