// Infrastructure error mapping
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;
pub mod handle;

// Re-export key types
pub use apache_object_store_adapter::ApacheObjectStoreAdapter;
pub use handle::{
    ConnectionOverrides, ConnectionState, StorageBackend, StoreConfig, StoreHandle,
};
