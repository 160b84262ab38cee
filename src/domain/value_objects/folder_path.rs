use serde::Serialize;

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::ObjectKey;

/// Separator between path segments, both in display paths and store keys
pub const SEPARATOR: char = '/';

/// Basename of the zero-length placeholder object that makes an empty
/// folder exist in a store that has no real directories. Marker objects
/// are written by folder creation and hidden from every listing.
pub const FOLDER_MARKER: &str = ".keep";

/// A normalized folder location in the virtual hierarchy.
///
/// The root is the empty string; every other path is `a/b/c` with no
/// leading, trailing or repeated separators. Construction via [`parse`]
/// is total: any raw input collapses to its normalized form.
///
/// [`parse`]: FolderPath::parse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FolderPath(String);

impl FolderPath {
    /// The root of the hierarchy
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Normalize arbitrary input into a folder path.
    ///
    /// Splits on the separator and drops empty segments, so `"/a//b/"`,
    /// `"a/b"` and `"a/b/"` all become the same path.
    pub fn parse(input: &str) -> Self {
        let normalized = input
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The store prefix covering everything under this folder.
    ///
    /// Empty for the root, otherwise the path with a trailing separator,
    /// so `files/reports` lists as `files/reports/`.
    pub fn as_prefix(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}{}", self.0, SEPARATOR)
        }
    }

    /// The folder's own name, empty for the root
    pub fn name(&self) -> &str {
        self.0
            .rfind(SEPARATOR)
            .map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Nesting level, zero for the root
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.split(SEPARATOR).count()
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
    }

    /// The containing folder, `None` at the root
    pub fn parent(&self) -> Option<FolderPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self::root()),
        }
    }

    /// Append a child segment, normalizing the input
    pub fn join(&self, name: &str) -> FolderPath {
        FolderPath::parse(&format!("{}/{}", self.0, name))
    }

    /// Append a child segment after checking it against the folder rules.
    ///
    /// Rejects empty names, names over the length limit, forbidden
    /// characters and paths that would exceed the depth limit.
    pub fn validated_join(
        &self,
        name: &str,
        limits: &FolderLimits,
    ) -> Result<FolderPath, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyFolderName);
        }

        if name.chars().count() > limits.max_name_len {
            return Err(ValidationError::FolderNameTooLong {
                actual: name.chars().count(),
                max: limits.max_name_len,
            });
        }

        // The separator would silently change the nesting level
        if name.contains(SEPARATOR) {
            return Err(ValidationError::ForbiddenFolderCharacter(SEPARATOR));
        }

        if let Some(c) = name.chars().find(|c| limits.forbidden_chars.contains(c)) {
            return Err(ValidationError::ForbiddenFolderCharacter(c));
        }

        let depth = self.depth() + 1;
        if depth > limits.max_depth {
            return Err(ValidationError::FolderTooDeep {
                actual: depth,
                max: limits.max_depth,
            });
        }

        Ok(self.join(name))
    }

    /// Trail of ancestors from the first segment down to this folder,
    /// excluding the root
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = Vec::new();
        let mut current = String::new();
        for segment in self.segments() {
            if !current.is_empty() {
                current.push(SEPARATOR);
            }
            current.push_str(segment);
            crumbs.push(Breadcrumb {
                name: segment.to_string(),
                path: FolderPath(current.clone()),
            });
        }
        crumbs
    }

    /// Key of the placeholder object that materializes this folder
    pub fn marker_key(&self) -> Result<ObjectKey, ValidationError> {
        ObjectKey::new(format!("{}{}", self.as_prefix(), FOLDER_MARKER))
    }
}

impl std::fmt::Display for FolderPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub path: FolderPath,
}

/// Rules a new folder name is checked against
#[derive(Debug, Clone)]
pub struct FolderLimits {
    pub max_name_len: usize,
    pub forbidden_chars: Vec<char>,
    pub max_depth: usize,
}

impl Default for FolderLimits {
    fn default() -> Self {
        Self {
            max_name_len: 255,
            forbidden_chars: vec!['\\', ':', '*', '?', '"', '<', '>', '|'],
            max_depth: 10,
        }
    }
}
