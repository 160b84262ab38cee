pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BatchOperation,
    Breadcrumb,
    DuplicateResolution,
    FileEntry,
    FolderEntry,
    FolderLimits,
    // Models
    FolderListing,
    // Value objects
    FolderPath,
    MoveOutcome,
    ObjectKey,
    PendingUpload,
    ResolvedUpload,
    // Errors
    StorageError,
    StorageQuota,
    StorageResult,
    UploadOutcome,
    UploadReceipt,
    UploadRequest,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{
    // Service ports
    BrowseService,
    FileOpsService,
    ObjectInfo,
    // Storage ports
    ObjectStore,
    PrefixListing,
    PutObjectOptions,
    QuotaService,
    StoreSource,
    StoredObject,
    UploadService,
};

// Service implementations - business logic
pub use services::{
    BrowseServiceImpl, FileOpsServiceImpl, QuotaServiceImpl, StoragePolicy, UploadServiceImpl,
};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppError, AppServices, create_app_from_env, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    ApacheObjectStoreAdapter, ConnectionOverrides, ConnectionState, StorageBackend, StoreConfig,
    StoreHandle,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        ApacheObjectStoreAdapter, AppBuilder, AppServices, BrowseService, DuplicateResolution,
        FileOpsService, FolderPath, ObjectKey, ObjectStore, QuotaService, StoragePolicy,
        StoreHandle, UploadRequest, UploadService, create_in_memory_app,
    };
}
