use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::{
    errors::StorageResult,
    value_objects::{FolderPath, ObjectKey},
};

/// Port for the flat object store underneath the folder hierarchy.
/// This abstracts the actual storage backend (S3, in-memory, etc.)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store object data under a key
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: PutObjectOptions,
    ) -> StorageResult<()>;

    /// Retrieve object data together with its attributes
    async fn get_object(&self, key: &ObjectKey) -> StorageResult<StoredObject>;

    /// Fetch object metadata without retrieving data
    async fn head_object(&self, key: &ObjectKey) -> StorageResult<ObjectInfo>;

    /// Check if object exists
    async fn object_exists(&self, key: &ObjectKey) -> StorageResult<bool>;

    /// Delete object data
    async fn delete_object(&self, key: &ObjectKey) -> StorageResult<()>;

    /// Copy an object to a new key
    async fn copy_object(
        &self,
        source_key: &ObjectKey,
        destination_key: &ObjectKey,
    ) -> StorageResult<()>;

    /// List every object under a folder prefix, recursively
    async fn list_prefix(
        &self,
        prefix: &FolderPath,
        max_results: Option<usize>,
    ) -> StorageResult<Vec<ObjectInfo>>;

    /// List one hierarchy level: direct objects plus the distinct
    /// sub-prefixes ending at the next separator
    async fn list_with_delimiter(
        &self,
        prefix: &FolderPath,
        max_results: Option<usize>,
    ) -> StorageResult<PrefixListing>;

    /// Get a pre-signed URL granting read access for a limited time
    async fn presigned_get_url(
        &self,
        key: &ObjectKey,
        expires_in: Duration,
    ) -> StorageResult<String>;
}

/// Information about an object in storage
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub key: ObjectKey,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// Attributes attached to an object at write time
#[derive(Debug, Clone, Default)]
pub struct PutObjectOptions {
    pub content_type: Option<String>,
    pub metadata: Vec<(String, String)>,
}

/// Retrieved object data with its attributes
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// One delimiter-grouped page of a prefix
#[derive(Debug, Clone)]
pub struct PrefixListing {
    /// Objects directly under the prefix
    pub objects: Vec<ObjectInfo>,
    /// Distinct next-level prefixes, already normalized to folder paths
    pub common_prefixes: Vec<FolderPath>,
}
