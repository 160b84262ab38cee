use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    models::{DuplicateResolution, PendingUpload, ResolvedUpload, UploadOutcome, UploadRequest},
};

/// Port for validated, duplicate-aware uploads
#[async_trait]
pub trait UploadService: Send + Sync + 'static {
    /// Validate and upload one file.
    ///
    /// Validation failures surface before any request is made. When the
    /// destination key already exists the upload is parked and returned
    /// as [`UploadOutcome::DuplicateDetected`] instead of overwriting.
    /// Transient transmission failures are retried with exponential
    /// backoff before the final error is reported.
    async fn upload(&self, request: UploadRequest) -> StorageResult<UploadOutcome>;

    /// Continue a parked upload according to the caller's decision
    async fn resolve_duplicate(
        &self,
        pending: PendingUpload,
        resolution: DuplicateResolution,
    ) -> StorageResult<ResolvedUpload>;
}
