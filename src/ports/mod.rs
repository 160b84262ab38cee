pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use services::{BrowseService, FileOpsService, QuotaService, UploadService};
pub use storage::{
    ObjectInfo, ObjectStore, PrefixListing, PutObjectOptions, StoreSource, StoredObject,
};
