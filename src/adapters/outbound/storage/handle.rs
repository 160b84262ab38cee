use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use object_store::{
    aws::AmazonS3Builder, memory::InMemory, ClientOptions, RetryConfig,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        value_objects::FolderPath,
    },
    ports::storage::{ObjectStore, StoreSource},
};

use super::apache_object_store_adapter::ApacheObjectStoreAdapter;

/// Configuration for the store client
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StorageBackend,
    /// Per-request deadline enforced by the HTTP client
    pub request_timeout: Duration,
    /// Transport-level retries inside the client, distinct from the
    /// upload retry loop in the upload service
    pub transport_retries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            request_timeout: Duration::from_secs(30),
            transport_retries: 3,
        }
    }
}

impl StoreConfig {
    /// Reject configurations that can never produce a working client
    pub fn validate(&self) -> StorageResult<()> {
        if let StorageBackend::S3 {
            bucket,
            region,
            access_key,
            secret_key,
            ..
        } = &self.backend
        {
            if bucket.trim().is_empty() {
                return Err(StorageError::Configuration {
                    message: "Bucket name is missing".to_string(),
                });
            }
            if region.trim().is_empty() {
                return Err(StorageError::Configuration {
                    message: "Region is missing".to_string(),
                });
            }
            if access_key.trim().is_empty() || secret_key.trim().is_empty() {
                return Err(StorageError::Configuration {
                    message: "Credential pair is incomplete".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge overrides into this configuration, field by field.
    /// Backend-level overrides only apply to the S3 backend; the
    /// in-memory backend has nothing to override except the timeout.
    pub fn apply(mut self, overrides: ConnectionOverrides) -> Self {
        if let Some(timeout) = overrides.request_timeout {
            self.request_timeout = timeout;
        }

        if let StorageBackend::S3 {
            bucket,
            region,
            endpoint,
            access_key,
            secret_key,
            allow_http,
        } = &mut self.backend
        {
            if let Some(value) = overrides.bucket {
                *bucket = value;
            }
            if let Some(value) = overrides.region {
                *region = value;
            }
            if let Some(value) = overrides.endpoint {
                *endpoint = Some(value);
            }
            if let Some(value) = overrides.access_key {
                *access_key = value;
            }
            if let Some(value) = overrides.secret_key {
                *secret_key = value;
            }
            if let Some(value) = overrides.allow_http {
                *allow_http = value;
            }
        }

        self
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3 {
        bucket: String,
        region: String,
        /// Custom endpoint for S3-compatible stores (MinIO, R2, ...)
        endpoint: Option<String>,
        access_key: String,
        secret_key: String,
        allow_http: bool,
    },
}

/// Partial replacement settings for reinitializing the connection
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub allow_http: Option<bool>,
    pub request_timeout: Option<Duration>,
}

/// Observed health of the store connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    /// A health check failed; a later successful check can recover
    Disconnected,
    /// Rebuilding the client failed; only a successful reinitialization
    /// or health check leaves this state
    Unrecoverable,
}

/// Shared handle to the store client and its connection state.
///
/// Services hold this instead of a bare store so that reinitializing
/// the client swaps it for every caller at once.
pub struct StoreHandle {
    config: RwLock<StoreConfig>,
    store: RwLock<Arc<dyn ObjectStore>>,
    state: RwLock<ConnectionState>,
}

impl StoreHandle {
    /// Build a client from the configuration and wrap it in a handle
    pub fn connect(config: StoreConfig) -> StorageResult<Self> {
        config.validate()?;
        let store = build_store(&config)?;
        Ok(Self {
            config: RwLock::new(config),
            store: RwLock::new(store),
            state: RwLock::new(ConnectionState::Connected),
        })
    }

    /// Wrap an existing store, bypassing client construction
    pub fn with_store(store: Arc<dyn ObjectStore>, config: StoreConfig) -> Self {
        Self {
            config: RwLock::new(config),
            store: RwLock::new(store),
            state: RwLock::new(ConnectionState::Connected),
        }
    }

    /// The current store client
    pub async fn store(&self) -> Arc<dyn ObjectStore> {
        self.store.read().await.clone()
    }

    pub async fn connection_state(&self) -> ConnectionState {
        *self.state.read().await
    }

    pub async fn is_offline(&self) -> bool {
        self.connection_state().await != ConnectionState::Connected
    }

    pub async fn current_config(&self) -> StoreConfig {
        self.config.read().await.clone()
    }

    /// Probe the store with a minimal listing and record the result.
    /// Never fails; an unhealthy store reports `false`.
    pub async fn check_connection(&self) -> bool {
        let store = self.store().await;
        let healthy = match store.list_prefix(&FolderPath::root(), Some(1)).await {
            Ok(_) => true,
            Err(error) => {
                warn!(%error, "store health check failed");
                false
            }
        };

        let new_state = if healthy {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };
        *self.state.write().await = new_state;

        healthy
    }

    /// Rebuild the store client with the merged configuration.
    ///
    /// On success the new client replaces the old one for every service
    /// holding this handle. On failure the old client stays in place and
    /// the connection is marked unrecoverable.
    pub async fn reinitialize(&self, overrides: ConnectionOverrides) -> bool {
        let merged = self.config.read().await.clone().apply(overrides);

        let rebuilt = merged.validate().and_then(|_| build_store(&merged));
        match rebuilt {
            Ok(new_store) => {
                *self.config.write().await = merged;
                *self.store.write().await = new_store;
                *self.state.write().await = ConnectionState::Connected;
                info!("store client reinitialized");
                true
            }
            Err(error) => {
                error!(%error, "store client reinitialization failed");
                *self.state.write().await = ConnectionState::Unrecoverable;
                false
            }
        }
    }
}

#[async_trait]
impl StoreSource for StoreHandle {
    async fn store(&self) -> Arc<dyn ObjectStore> {
        StoreHandle::store(self).await
    }

    async fn offline(&self) -> bool {
        self.is_offline().await
    }
}

/// Construct the adapter stack for a configuration
fn build_store(config: &StoreConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    match &config.backend {
        StorageBackend::InMemory => {
            debug!("building in-memory store");
            Ok(Arc::new(ApacheObjectStoreAdapter::new(Arc::new(
                InMemory::new(),
            ))))
        }
        StorageBackend::S3 {
            bucket,
            region,
            endpoint,
            access_key,
            secret_key,
            allow_http,
        } => {
            debug!(bucket, region, "building S3 store");

            let mut builder = AmazonS3Builder::new()
                .with_bucket_name(bucket.clone())
                .with_region(region.clone())
                .with_access_key_id(access_key.clone())
                .with_secret_access_key(secret_key.clone())
                .with_client_options(ClientOptions::new().with_timeout(config.request_timeout))
                .with_retry(RetryConfig {
                    max_retries: config.transport_retries,
                    ..Default::default()
                });

            if let Some(endpoint) = endpoint {
                builder = builder.with_endpoint(endpoint.clone());
            }
            if *allow_http {
                builder = builder.with_allow_http(true);
            }

            let s3 = Arc::new(builder.build().map_err(StorageError::from)?);
            Ok(Arc::new(ApacheObjectStoreAdapter::with_signer(
                s3.clone(),
                s3,
            )))
        }
    }
}
