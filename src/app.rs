use std::sync::Arc;
use std::time::Duration;

use crate::{
    adapters::outbound::storage::{StorageBackend, StoreConfig, StoreHandle},
    ports::storage::{ObjectStore, StoreSource},
    services::{
        BrowseServiceImpl, FileOpsServiceImpl, QuotaServiceImpl, StoragePolicy,
        UploadServiceImpl,
    },
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub policy: StoragePolicy,
}

/// Application services container.
///
/// The handle is shared by every service; reinitializing the connection
/// through it swaps the store client for all of them at once.
pub struct AppServices {
    pub handle: Arc<StoreHandle>,
    pub browse: BrowseServiceImpl,
    pub upload: UploadServiceImpl,
    pub file_ops: FileOpsServiceImpl,
    pub quota: QuotaServiceImpl,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    store: Option<Arc<dyn ObjectStore>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the store client
    pub fn with_store_config(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Configure the storage backend
    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.config.store.backend = backend;
        self
    }

    /// Configure service rules and limits
    pub fn with_policy(mut self, policy: StoragePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Inject a pre-built store, bypassing client construction
    pub fn with_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the complete application with services
    pub fn build(self) -> Result<AppServices, AppError> {
        let AppConfig { store, policy } = self.config;

        let handle = match self.store {
            Some(injected) => StoreHandle::with_store(injected, store),
            None => StoreHandle::connect(store).map_err(|e| AppError::StorageInit {
                message: e.to_string(),
            })?,
        };

        let handle = Arc::new(handle);
        let policy = Arc::new(policy);
        let source: Arc<dyn StoreSource> = handle.clone();

        Ok(AppServices {
            browse: BrowseServiceImpl::new(source.clone(), policy.clone()),
            upload: UploadServiceImpl::new(source.clone(), policy.clone()),
            file_ops: FileOpsServiceImpl::new(source.clone(), policy.clone()),
            quota: QuotaServiceImpl::new(source, policy),
            handle,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Create an in-memory application for testing and development
pub fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new().build()
}

/// Create application from environment variables
pub fn create_app_from_env() -> Result<AppServices, AppError> {
    // Pick up a .env file when present
    dotenvy::dotenv().ok();

    let backend = match std::env::var("STORAGE_BACKEND").as_deref() {
        Ok("s3") => StorageBackend::S3 {
            bucket: require_env("S3_BUCKET")?,
            region: require_env("S3_REGION")?,
            endpoint: std::env::var("S3_ENDPOINT").ok(),
            access_key: require_env("S3_ACCESS_KEY")?,
            secret_key: require_env("S3_SECRET_KEY")?,
            allow_http: env_flag("S3_ALLOW_HTTP"),
        },
        _ => StorageBackend::InMemory,
    };

    let mut store = StoreConfig {
        backend,
        ..StoreConfig::default()
    };
    if let Some(secs) = parse_env::<u64>("REQUEST_TIMEOUT_SECS")? {
        store.request_timeout = Duration::from_secs(secs);
    }
    if let Some(retries) = parse_env::<usize>("TRANSPORT_RETRIES")? {
        store.transport_retries = retries;
    }

    let mut policy = StoragePolicy::default();
    if let Some(size) = parse_env::<u64>("MAX_UPLOAD_SIZE")? {
        policy.max_upload_size = size;
    }
    if let Some(capacity) = parse_env::<u64>("STORAGE_CAPACITY")? {
        policy.storage_capacity = capacity;
    }
    if let Some(attempts) = parse_env::<u32>("UPLOAD_ATTEMPTS")? {
        policy.upload_attempts = attempts;
    }
    if let Some(cap) = parse_env::<usize>("MAX_CONCURRENT_REQUESTS")? {
        policy.max_concurrent_requests = Some(cap);
    }

    AppBuilder::new()
        .with_config(AppConfig { store, policy })
        .build()
}

fn require_env(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::Configuration {
        message: format!("{} environment variable required", name),
    })
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Configuration {
                message: format!("Invalid value for {}: {}", name, value),
            }),
        Err(_) => Ok(None),
    }
}
