use std::time::Duration;

use crate::domain::value_objects::FolderLimits;

/// Tunable rules and limits shared by the services
#[derive(Debug, Clone)]
pub struct StoragePolicy {
    /// Largest accepted upload, in bytes
    pub max_upload_size: u64,
    /// MIME allow-list; a `type/*` entry accepts the whole top-level type
    pub allowed_content_types: Vec<String>,
    pub folder_limits: FolderLimits,
    /// Cap on one delimited listing page
    pub list_page_size: usize,
    /// Capacity reported by the quota service, in bytes
    pub storage_capacity: u64,
    /// Concurrency cap for batch fan-out; unbounded when `None`
    pub max_concurrent_requests: Option<usize>,
    /// Send attempts per upload before the last error is surfaced
    pub upload_attempts: u32,
    /// Delay before the first upload retry; doubles per failed attempt
    pub upload_backoff_base: Duration,
}

impl StoragePolicy {
    /// Check a content type against the allow-list, case-insensitively
    pub fn allows_content_type(&self, content_type: &str) -> bool {
        self.allowed_content_types.iter().any(|allowed| {
            match allowed.strip_suffix("/*") {
                Some(top_level) => content_type
                    .split('/')
                    .next()
                    .is_some_and(|t| t.eq_ignore_ascii_case(top_level)),
                None => allowed.eq_ignore_ascii_case(content_type),
            }
        })
    }
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self {
            max_upload_size: 50 * 1024 * 1024,
            allowed_content_types: vec![
                "image/*".to_string(),
                "video/*".to_string(),
                "audio/*".to_string(),
                "text/plain".to_string(),
                "text/csv".to_string(),
                "application/pdf".to_string(),
                "application/json".to_string(),
                "application/zip".to_string(),
                "application/msword".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
                "application/vnd.ms-excel".to_string(),
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ],
            folder_limits: FolderLimits::default(),
            list_page_size: 1000,
            storage_capacity: 5 * 1024 * 1024 * 1024,
            max_concurrent_requests: None,
            upload_attempts: 3,
            upload_backoff_base: Duration::from_millis(1000),
        }
    }
}
