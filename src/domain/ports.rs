use super::bill::BillId;
use super::configuration::PersistedConfiguration;
use super::dashboard::Dashboard;
use crate::error::Result;
use async_trait::async_trait;

/// Durable AutoPay configurations, one record per bill.
///
/// `put` must either replace the whole record for the bill or leave the
/// previous record untouched.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    async fn get(&self, bill_id: &BillId) -> Result<Option<PersistedConfiguration>>;
    async fn put(&self, config: PersistedConfiguration) -> Result<()>;
}

/// The aggregate bill list shown on the dashboard.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn load(&self) -> Result<Option<Dashboard>>;
    async fn save(&self, dashboard: Dashboard) -> Result<()>;
}

pub type ConfigurationStoreBox = Box<dyn ConfigurationStore>;
pub type DashboardStoreBox = Box<dyn DashboardStore>;
