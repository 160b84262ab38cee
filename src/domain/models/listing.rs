use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{Breadcrumb, FolderPath, ObjectKey};

/// A file as it appears in one folder listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    /// Full store key, unmodified
    pub key: ObjectKey,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// A direct subfolder with aggregates computed over all its descendants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderEntry {
    pub name: String,
    /// Total size of every descendant file
    pub size: u64,
    /// Direct children: files plus immediate subfolders
    pub item_count: usize,
    /// Most recent modification anywhere beneath this folder
    pub last_modified: DateTime<Utc>,
}

/// Contents of one folder, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct FolderListing {
    pub files: Vec<FileEntry>,
    pub folders: Vec<FolderEntry>,
    pub current_path: FolderPath,
    /// `None` at the root
    pub parent_path: Option<FolderPath>,
}

impl FolderListing {
    /// Ancestor trail of the listed folder
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.current_path.breadcrumbs()
    }
}
