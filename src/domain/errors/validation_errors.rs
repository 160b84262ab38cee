/// Validation errors for domain value objects and upload candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // Folder name validation errors
    EmptyFolderName,
    FolderNameTooLong {
        actual: usize,
        max: usize,
    },
    ForbiddenFolderCharacter(char),
    FolderTooDeep {
        actual: usize,
        max: usize,
    },

    // Upload validation errors
    FileTypeNotAllowed {
        content_type: String,
    },
    FileTooLarge {
        size: u64,
        max: u64,
    },

    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyEndsWithSlash,
    ObjectKeyContainsDoubleSlash,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Folder name errors
            ValidationError::EmptyFolderName => write!(f, "Folder name cannot be empty"),
            ValidationError::FolderNameTooLong { actual, max } => {
                write!(
                    f,
                    "Folder name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::ForbiddenFolderCharacter(c) => {
                write!(f, "Folder name contains forbidden character '{}'", c)
            }
            ValidationError::FolderTooDeep { actual, max } => {
                write!(f, "Folder nested too deep: {} levels (max: {})", actual, max)
            }

            // Upload errors
            ValidationError::FileTypeNotAllowed { content_type } => {
                write!(f, "File type '{}' is not allowed", content_type)
            }
            ValidationError::FileTooLarge { size, max } => {
                write!(f, "File too large: {} bytes (max: {})", size, max)
            }

            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: '{}'", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyEndsWithSlash => {
                write!(f, "Object key cannot end with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
