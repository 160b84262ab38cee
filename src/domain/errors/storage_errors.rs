use crate::domain::errors::ValidationError;

/// Errors that can occur while talking to the object store.
///
/// Every transport or backend failure is folded into exactly one of these
/// variants before it leaves the adapter layer, so callers never see raw
/// backend errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Client or store configuration is missing or inconsistent
    Configuration { message: String },

    /// Credentials were rejected or the bucket policy denied the request
    Permission { message: String },

    /// The requested object does not exist
    NotFound { message: String },

    /// Connectivity failure between client and store
    Network { message: String },

    /// The request did not complete within the configured deadline
    Timeout { message: String },

    /// The store rejected the request at the cross-origin layer
    Cors { message: String },

    /// A domain value failed validation before any request was made
    Validation(ValidationError),

    /// Anything the taxonomy cannot name more precisely
    Unknown { message: String },
}

impl StorageError {
    /// Whether a retry of the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StorageError::Network { .. } | StorageError::Timeout { .. }
        )
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Configuration { message } => {
                write!(f, "Configuration error: {}", message)
            }
            StorageError::Permission { message } => {
                write!(f, "Permission denied: {}", message)
            }
            StorageError::NotFound { message } => {
                write!(f, "Not found: {}", message)
            }
            StorageError::Network { message } => {
                write!(f, "Network error: {}", message)
            }
            StorageError::Timeout { message } => {
                write!(f, "Timeout: {}", message)
            }
            StorageError::Cors { message } => {
                write!(f, "CORS rejection: {}", message)
            }
            StorageError::Validation(err) => {
                write!(f, "Validation error: {}", err)
            }
            StorageError::Unknown { message } => {
                write!(f, "Storage error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        StorageError::Validation(err)
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
