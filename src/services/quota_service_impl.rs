use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    domain::{errors::StorageResult, models::StorageQuota, value_objects::FolderPath},
    ports::{services::QuotaService, storage::StoreSource},
    services::StoragePolicy,
};

/// Implementation of QuotaService by summing a full recursive listing
#[derive(Clone)]
pub struct QuotaServiceImpl {
    source: Arc<dyn StoreSource>,
    policy: Arc<StoragePolicy>,
}

impl QuotaServiceImpl {
    pub fn new(source: Arc<dyn StoreSource>, policy: Arc<StoragePolicy>) -> Self {
        Self { source, policy }
    }
}

#[async_trait]
impl QuotaService for QuotaServiceImpl {
    async fn storage_quota(&self) -> StorageResult<StorageQuota> {
        let store = self.source.store().await;
        let objects = store.list_prefix(&FolderPath::root(), None).await?;
        let used = objects.iter().map(|info| info.size).sum();

        debug!(used, objects = objects.len(), "storage usage computed");
        Ok(StorageQuota {
            used,
            total: self.policy.storage_capacity,
        })
    }
}
