mod folder_path;
mod object_key;

pub use folder_path::{Breadcrumb, FolderLimits, FolderPath, FOLDER_MARKER, SEPARATOR};
pub use object_key::ObjectKey;
