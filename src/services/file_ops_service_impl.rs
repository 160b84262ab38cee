use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{StorageResult, ValidationError},
        models::{BatchOperation, MoveOutcome},
        value_objects::{FolderPath, ObjectKey},
    },
    ports::{
        services::FileOpsService,
        storage::{PutObjectOptions, StoreSource},
    },
    services::StoragePolicy,
};

/// Content type stamped on folder placeholder objects
const FOLDER_CONTENT_TYPE: &str = "application/x-directory";

/// Implementation of FileOpsService: folder management, transfers and
/// concurrent batch operations
#[derive(Clone)]
pub struct FileOpsServiceImpl {
    source: Arc<dyn StoreSource>,
    policy: Arc<StoragePolicy>,
}

impl FileOpsServiceImpl {
    pub fn new(source: Arc<dyn StoreSource>, policy: Arc<StoragePolicy>) -> Self {
        Self { source, policy }
    }

    /// Run all requests, bounded by the configured concurrency cap.
    /// Every request settles; nothing is cancelled by an early failure.
    async fn settle<F>(&self, requests: impl IntoIterator<Item = F>) -> Vec<StorageResult<()>>
    where
        F: Future<Output = StorageResult<()>>,
    {
        let concurrency = self.policy.max_concurrent_requests.unwrap_or(usize::MAX);
        stream::iter(requests)
            .buffer_unordered(concurrency)
            .collect()
            .await
    }

    /// Fold settled results into one outcome: the first error wins, the
    /// rest are only counted
    fn report(&self, operation: &str, results: Vec<StorageResult<()>>) -> StorageResult<()> {
        let total = results.len();
        let mut failed = 0usize;
        let mut first_error = None;

        for result in results {
            if let Err(error) = result {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }

        match first_error {
            Some(error) => {
                warn!(operation, failed, total, "batch requests partially failed");
                Err(error)
            }
            None => Ok(()),
        }
    }

    /// Pair every source key with its destination under the target folder
    fn transfer_pairs(
        keys: &[ObjectKey],
        destination: &FolderPath,
    ) -> Result<Vec<(ObjectKey, ObjectKey)>, ValidationError> {
        keys.iter()
            .map(|source| {
                let dest = ObjectKey::in_folder(destination, source.basename())?;
                Ok((source.clone(), dest))
            })
            .collect()
    }
}

#[async_trait]
impl FileOpsService for FileOpsServiceImpl {
    async fn create_folder(&self, path: &FolderPath) -> StorageResult<()> {
        let Some(parent) = path.parent() else {
            return Err(ValidationError::EmptyFolderName.into());
        };
        parent.validated_join(path.name(), &self.policy.folder_limits)?;

        let marker = path.marker_key()?;
        let store = self.source.store().await;
        store
            .put_object(
                &marker,
                Bytes::new(),
                PutObjectOptions {
                    content_type: Some(FOLDER_CONTENT_TYPE.to_string()),
                    metadata: Vec::new(),
                },
            )
            .await?;

        debug!(path = %path, "folder created");
        Ok(())
    }

    async fn delete_folder(&self, path: &FolderPath) -> StorageResult<usize> {
        let store = self.source.store().await;

        let objects = store.list_prefix(path, None).await?;
        if objects.is_empty() {
            debug!(path = %path, "folder already empty");
            return Ok(0);
        }

        let total = objects.len();
        let deletions = objects.into_iter().map(|entry| {
            let store = store.clone();
            async move { store.delete_object(&entry.key).await }
        });
        let results = self.settle(deletions).await;
        self.report("delete folder contents", results)?;

        info!(path = %path, removed = total, "folder deleted");
        Ok(total)
    }

    async fn move_file(
        &self,
        source: &ObjectKey,
        destination: &ObjectKey,
    ) -> StorageResult<MoveOutcome> {
        let store = self.source.store().await;

        // Deleting after a self-copy would destroy the only copy; the
        // object is already at its destination
        if source == destination {
            store.head_object(source).await?;
            debug!(key = %source, "move to the same key, nothing to do");
            return Ok(MoveOutcome::Moved);
        }

        store.copy_object(source, destination).await?;

        match store.delete_object(source).await {
            Ok(()) => {
                debug!(source = %source, destination = %destination, "object moved");
                Ok(MoveOutcome::Moved)
            }
            Err(error) => {
                warn!(
                    source = %source,
                    destination = %destination,
                    %error,
                    "copy succeeded but source deletion failed, object now exists under both keys"
                );
                Ok(MoveOutcome::SourceRetained {
                    source: source.clone(),
                    error,
                })
            }
        }
    }

    async fn copy_file(
        &self,
        source: &ObjectKey,
        destination: &ObjectKey,
    ) -> StorageResult<()> {
        let store = self.source.store().await;
        store.copy_object(source, destination).await?;
        debug!(source = %source, destination = %destination, "object copied");
        Ok(())
    }

    async fn rename_file(
        &self,
        source: &ObjectKey,
        destination: &ObjectKey,
    ) -> StorageResult<MoveOutcome> {
        // A rename is a move to the new key
        self.move_file(source, destination).await
    }

    async fn batch_operation(
        &self,
        keys: &[ObjectKey],
        operation: BatchOperation,
    ) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let store = self.source.store().await;

        match operation {
            BatchOperation::Delete => {
                let requests = keys.iter().cloned().map(|key| {
                    let store = store.clone();
                    async move { store.delete_object(&key).await }
                });
                let results = self.settle(requests).await;
                self.report("batch delete", results)
            }
            BatchOperation::Copy { destination } => {
                // Destinations are derived up front so a validation
                // failure surfaces before any request is issued
                let pairs = Self::transfer_pairs(keys, &destination)?;
                let requests = pairs.into_iter().map(|(source, dest)| {
                    let store = store.clone();
                    async move { store.copy_object(&source, &dest).await }
                });
                let results = self.settle(requests).await;
                self.report("batch copy", results)
            }
            BatchOperation::Move { destination } => {
                let pairs = Self::transfer_pairs(keys, &destination)?;
                // Unlike a single move, a failed delete here counts as a
                // failure of the whole entry
                let requests = pairs.into_iter().map(|(source, dest)| {
                    let store = store.clone();
                    async move {
                        // A key already under the destination stays put;
                        // deleting after a self-copy would destroy the
                        // only copy
                        if source == dest {
                            store.head_object(&source).await?;
                            return Ok(());
                        }
                        store.copy_object(&source, &dest).await?;
                        store.delete_object(&source).await
                    }
                });
                let results = self.settle(requests).await;
                self.report("batch move", results)
            }
        }
    }
}
