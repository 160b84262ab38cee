use bytes::Bytes;
use serde::Serialize;

use crate::domain::value_objects::ObjectKey;

/// Metadata attribute carrying the client's original file name
pub const METADATA_ORIGINAL_NAME: &str = "original-name";

/// Metadata attribute carrying the upload wall-clock timestamp (RFC 3339)
pub const METADATA_UPLOADED_AT: &str = "uploaded-at";

/// A file handed over for upload, together with its destination key
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub target: ObjectKey,
    /// Name the file had on the client, kept as provenance metadata
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadRequest {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Result of an upload attempt
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(UploadReceipt),
    /// The destination key already exists; nothing was written. The caller
    /// decides what happens next via
    /// [`resolve_duplicate`](crate::ports::services::UploadService::resolve_duplicate).
    DuplicateDetected(PendingUpload),
}

/// An upload parked because its destination key is already taken
#[derive(Debug)]
pub struct PendingUpload {
    request: UploadRequest,
}

impl PendingUpload {
    pub(crate) fn new(request: UploadRequest) -> Self {
        Self { request }
    }

    pub fn target(&self) -> &ObjectKey {
        &self.request.target
    }

    pub fn file_name(&self) -> &str {
        &self.request.file_name
    }

    pub(crate) fn into_request(self) -> UploadRequest {
        self.request
    }
}

/// How the caller wants a duplicate destination key handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateResolution {
    /// Overwrite the existing object
    Replace,
    /// Upload under a non-colliding variation of the name
    KeepBoth,
    /// Drop the upload, leaving the existing object untouched
    Skip,
}

/// Result of resolving a parked duplicate
#[derive(Debug)]
pub enum ResolvedUpload {
    Uploaded(UploadReceipt),
    Skipped,
}

/// Proof of a completed upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReceipt {
    /// Key the object was actually written under; differs from the
    /// requested target when a keep-both resolution renamed it
    pub key: ObjectKey,
    pub size: u64,
    /// Hex MD5 fingerprint of the uploaded bytes
    pub etag: String,
}
