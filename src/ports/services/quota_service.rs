use async_trait::async_trait;

use crate::domain::{errors::StorageResult, models::StorageQuota};

/// Port for storage usage reporting
#[async_trait]
pub trait QuotaService: Send + Sync + 'static {
    /// Total bytes stored across the whole hierarchy, against the
    /// configured capacity
    async fn storage_quota(&self) -> StorageResult<StorageQuota>;
}
