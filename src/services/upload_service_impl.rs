use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{StorageError, StorageResult, ValidationError},
        models::{
            DuplicateResolution, PendingUpload, ResolvedUpload, UploadOutcome, UploadReceipt,
            UploadRequest, METADATA_ORIGINAL_NAME, METADATA_UPLOADED_AT,
        },
        value_objects::ObjectKey,
    },
    ports::{
        services::UploadService,
        storage::{ObjectStore, PutObjectOptions, StoreSource},
    },
    services::StoragePolicy,
};

/// Implementation of UploadService with validation, duplicate handling
/// and retry on transient transmission failures
#[derive(Clone)]
pub struct UploadServiceImpl {
    source: Arc<dyn StoreSource>,
    policy: Arc<StoragePolicy>,
}

impl UploadServiceImpl {
    pub fn new(source: Arc<dyn StoreSource>, policy: Arc<StoragePolicy>) -> Self {
        Self { source, policy }
    }

    fn validate(&self, request: &UploadRequest) -> Result<(), ValidationError> {
        if !self.policy.allows_content_type(&request.content_type) {
            return Err(ValidationError::FileTypeNotAllowed {
                content_type: request.content_type.clone(),
            });
        }
        if request.size() > self.policy.max_upload_size {
            return Err(ValidationError::FileTooLarge {
                size: request.size(),
                max: self.policy.max_upload_size,
            });
        }
        Ok(())
    }

    /// Reject writes up front while the connection is known to be down
    async fn ensure_online(&self) -> StorageResult<()> {
        if self.source.offline().await {
            return Err(StorageError::Network {
                message: "Store connection is offline".to_string(),
            });
        }
        Ok(())
    }

    /// Send the object, retrying transient failures with exponential
    /// backoff. Every failed transient attempt is followed by its delay,
    /// the final one included, before the error is surfaced.
    async fn transmit(
        &self,
        store: &Arc<dyn ObjectStore>,
        request: &UploadRequest,
        target: &ObjectKey,
    ) -> StorageResult<UploadReceipt> {
        let options = PutObjectOptions {
            content_type: Some(request.content_type.clone()),
            metadata: vec![
                (METADATA_ORIGINAL_NAME.to_string(), request.file_name.clone()),
                (METADATA_UPLOADED_AT.to_string(), Utc::now().to_rfc3339()),
            ],
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match store
                .put_object(target, request.data.clone(), options.clone())
                .await
            {
                Ok(()) => {
                    debug!(key = %target, size = request.size(), attempt, "upload complete");
                    return Ok(UploadReceipt {
                        key: target.clone(),
                        size: request.size(),
                        etag: calculate_etag(&request.data),
                    });
                }
                Err(error) if error.is_transient() => {
                    let delay = backoff_delay(self.policy.upload_backoff_base, attempt);
                    warn!(
                        key = %target,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "upload attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    if attempt >= self.policy.upload_attempts {
                        return Err(error);
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Smallest `name (n).ext` variation not colliding with any direct
    /// sibling of the target
    async fn keep_both_key(
        &self,
        store: &Arc<dyn ObjectStore>,
        target: &ObjectKey,
    ) -> StorageResult<ObjectKey> {
        let folder = target.folder();
        let listing = store.list_with_delimiter(&folder, None).await?;
        let taken: HashSet<&str> = listing
            .objects
            .iter()
            .map(|info| info.key.basename())
            .collect();

        let (stem, extension) = split_file_name(target.basename());
        let mut counter = 1u32;
        loop {
            let candidate = match extension {
                Some(ext) => format!("{} ({}).{}", stem, counter, ext),
                None => format!("{} ({})", stem, counter),
            };
            if !taken.contains(candidate.as_str()) {
                return Ok(ObjectKey::in_folder(&folder, &candidate)?);
            }
            counter += 1;
        }
    }
}

#[async_trait]
impl UploadService for UploadServiceImpl {
    async fn upload(&self, request: UploadRequest) -> StorageResult<UploadOutcome> {
        self.validate(&request)?;
        self.ensure_online().await?;

        let store = self.source.store().await;
        if store.object_exists(&request.target).await? {
            debug!(key = %request.target, "destination key taken, parking upload");
            return Ok(UploadOutcome::DuplicateDetected(PendingUpload::new(request)));
        }

        let receipt = self.transmit(&store, &request, &request.target).await?;
        Ok(UploadOutcome::Uploaded(receipt))
    }

    async fn resolve_duplicate(
        &self,
        pending: PendingUpload,
        resolution: DuplicateResolution,
    ) -> StorageResult<ResolvedUpload> {
        match resolution {
            DuplicateResolution::Skip => {
                debug!(key = %pending.target(), "duplicate skipped");
                Ok(ResolvedUpload::Skipped)
            }
            DuplicateResolution::Replace => {
                self.ensure_online().await?;
                let request = pending.into_request();
                let store = self.source.store().await;
                let receipt = self.transmit(&store, &request, &request.target).await?;
                Ok(ResolvedUpload::Uploaded(receipt))
            }
            DuplicateResolution::KeepBoth => {
                self.ensure_online().await?;
                let request = pending.into_request();
                let store = self.source.store().await;
                let target = self.keep_both_key(&store, &request.target).await?;
                info!(requested = %request.target, renamed = %target, "keeping both copies");
                let receipt = self.transmit(&store, &request, &target).await?;
                Ok(ResolvedUpload::Uploaded(receipt))
            }
        }
    }
}

/// Content fingerprint recorded on the upload receipt
fn calculate_etag(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

/// Split a file name into stem and extension. Names without a dot and
/// dotfiles like `.env` have no extension.
fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (name, None),
    }
}
