use crate::domain::errors::StorageError;

/// Convert object_store errors to the domain error taxonomy.
///
/// This is the only place that inspects backend error shapes. Timeouts,
/// CORS rejections and connectivity failures all reach us as generic
/// transport errors, so anything without a dedicated variant falls back
/// to discrimination on the error text.
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => StorageError::NotFound {
                message: format!("Object not found: {}", path),
            },
            object_store::Error::PermissionDenied { path, .. } => StorageError::Permission {
                message: format!("Access denied for object: {}", path),
            },
            object_store::Error::Unauthenticated { path, .. } => StorageError::Permission {
                message: format!("Authentication rejected for object: {}", path),
            },
            object_store::Error::UnknownConfigurationKey { store, key } => {
                StorageError::Configuration {
                    message: format!("Unknown configuration key for {}: {}", store, key),
                }
            }
            object_store::Error::InvalidPath { source } => StorageError::Unknown {
                message: format!("Invalid object path: {}", source),
            },
            object_store::Error::NotSupported { source } => StorageError::Unknown {
                message: format!("Operation not supported by backend: {}", source),
            },
            other => classify_message(&other.to_string()),
        }
    }
}

/// Sort an undifferentiated transport error into the taxonomy by its text
fn classify_message(message: &str) -> StorageError {
    let lower = message.to_lowercase();

    if lower.contains("timed out") || lower.contains("timeout") || lower.contains("deadline") {
        StorageError::Timeout {
            message: message.to_string(),
        }
    } else if lower.contains("cors") || lower.contains("cross-origin") {
        StorageError::Cors {
            message: message.to_string(),
        }
    } else if lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
        || lower.contains("unreachable")
        || lower.contains("reset")
        || lower.contains("refused")
        || lower.contains("broken pipe")
        || lower.contains("503")
        || lower.contains("service unavailable")
        || lower.contains("502")
        || lower.contains("bad gateway")
        || lower.contains("429")
        || lower.contains("slow down")
    {
        StorageError::Network {
            message: message.to_string(),
        }
    } else if lower.contains("403")
        || lower.contains("forbidden")
        || lower.contains("access denied")
        || lower.contains("signature")
    {
        StorageError::Permission {
            message: message.to_string(),
        }
    } else if lower.contains("404") || lower.contains("not found") || lower.contains("nosuchkey") {
        StorageError::NotFound {
            message: message.to_string(),
        }
    } else {
        StorageError::Unknown {
            message: message.to_string(),
        }
    }
}
