use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use tracing::debug;

use crate::{
    domain::{
        errors::StorageResult,
        models::{FileEntry, FolderEntry, FolderListing},
        value_objects::{FolderPath, ObjectKey},
    },
    ports::{
        services::BrowseService,
        storage::{ObjectStore, StoreSource},
    },
    services::StoragePolicy,
};

/// Implementation of BrowseService over the flat store.
///
/// One delimited listing yields the direct files and subfolder names;
/// each subfolder then gets a recursive listing to compute its
/// aggregates, so the cost of a listing grows with the number of
/// descendants of the direct subfolders.
#[derive(Clone)]
pub struct BrowseServiceImpl {
    source: Arc<dyn StoreSource>,
    policy: Arc<StoragePolicy>,
}

impl BrowseServiceImpl {
    pub fn new(source: Arc<dyn StoreSource>, policy: Arc<StoragePolicy>) -> Self {
        Self { source, policy }
    }

    /// Aggregate one subfolder from a full recursive listing of it
    async fn folder_entry(
        store: Arc<dyn ObjectStore>,
        prefix: FolderPath,
    ) -> StorageResult<FolderEntry> {
        let descendants = store.list_prefix(&prefix, None).await?;

        let leading = prefix.as_prefix();
        let mut size = 0u64;
        let mut latest = None;
        let mut direct_files = 0usize;
        let mut subfolders = BTreeSet::new();

        for info in &descendants {
            size += info.size;
            if latest.map_or(true, |seen| info.last_modified > seen) {
                latest = Some(info.last_modified);
            }

            let Some(rest) = info.key.as_str().strip_prefix(&leading) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    subfolders.insert(child.to_string());
                }
                None => {
                    if !info.key.is_folder_marker() {
                        direct_files += 1;
                    }
                }
            }
        }

        Ok(FolderEntry {
            name: prefix.name().to_string(),
            size,
            item_count: direct_files + subfolders.len(),
            last_modified: latest.unwrap_or_else(Utc::now),
        })
    }
}

#[async_trait]
impl BrowseService for BrowseServiceImpl {
    async fn list_folder(&self, path: &FolderPath) -> StorageResult<FolderListing> {
        let store = self.source.store().await;
        debug!(path = %path, "listing folder");

        let page = store
            .list_with_delimiter(path, Some(self.policy.list_page_size))
            .await?;

        let files = page
            .objects
            .into_iter()
            .filter(|info| !info.key.is_folder_marker())
            .map(|info| FileEntry {
                key: info.key,
                size: info.size,
                last_modified: info.last_modified,
                etag: info.etag,
            })
            .collect();

        // All subfolder aggregates or none; a single failed listing
        // fails the whole call rather than returning partial figures
        let folders = try_join_all(page.common_prefixes.into_iter().map(|prefix| {
            let store = store.clone();
            Self::folder_entry(store, prefix)
        }))
        .await?;

        Ok(FolderListing {
            files,
            folders,
            current_path: path.clone(),
            parent_path: path.parent(),
        })
    }

    async fn download_url(
        &self,
        key: &ObjectKey,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let store = self.source.store().await;
        store.presigned_get_url(key, expires_in).await
    }
}
