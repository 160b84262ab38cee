use serde::Serialize;

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::folder_path::{FolderPath, FOLDER_MARKER, SEPARATOR};

/// A validated object key (full path) in the flat store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > 1024 {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        // Check for invalid characters (null bytes)
        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        // Check for invalid patterns
        if value.starts_with(SEPARATOR) {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        // Keys name files, never prefixes, so a trailing separator is invalid
        if value.ends_with(SEPARATOR) {
            return Err(ValidationError::ObjectKeyEndsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Build the key for a file named `name` directly inside `folder`
    pub fn in_folder(folder: &FolderPath, name: &str) -> Result<Self, ValidationError> {
        ObjectKey::new(format!("{}{}", folder.as_prefix(), name))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The folder this key lives in (root if the key has no separator)
    pub fn folder(&self) -> FolderPath {
        match self.0.rfind(SEPARATOR) {
            Some(idx) => FolderPath::parse(&self.0[..idx]),
            None => FolderPath::root(),
        }
    }

    /// Get the file name part of the key (everything after the last '/')
    pub fn basename(&self) -> &str {
        self.0
            .rfind(SEPARATOR)
            .map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Whether this key is a zero-length placeholder that materializes a folder
    pub fn is_folder_marker(&self) -> bool {
        self.basename() == FOLDER_MARKER
    }

    /// Check if this key lies under the given folder (at any depth)
    pub fn has_prefix(&self, folder: &FolderPath) -> bool {
        folder.is_root() || self.0.starts_with(&folder.as_prefix())
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
