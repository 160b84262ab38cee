use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    models::FolderListing,
    value_objects::{FolderPath, ObjectKey},
};

/// Port for navigating the virtual folder hierarchy
#[async_trait]
pub trait BrowseService: Send + Sync + 'static {
    /// List one folder: its direct files and its direct subfolders with
    /// aggregates computed over all their descendants.
    ///
    /// Placeholder marker objects never appear in the result. The whole
    /// call fails if any underlying listing fails; no partial listing is
    /// returned.
    async fn list_folder(&self, path: &FolderPath) -> StorageResult<FolderListing>;

    /// Pre-signed URL granting temporary read access to one object
    async fn download_url(&self, key: &ObjectKey, expires_in: Duration)
        -> StorageResult<String>;
}
