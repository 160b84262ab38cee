use std::sync::Arc;

use async_trait::async_trait;

use super::ObjectStore;

/// Port supplying the current store client.
///
/// The client behind this port can be swapped at runtime when the
/// connection is reinitialized, so services fetch it per call instead
/// of holding a store directly.
#[async_trait]
pub trait StoreSource: Send + Sync + 'static {
    /// The store client to use for the next request
    async fn store(&self) -> Arc<dyn ObjectStore>;

    /// Whether the connection is known to be down. Writes are rejected
    /// up front while offline instead of timing out against a dead store.
    async fn offline(&self) -> bool;
}
