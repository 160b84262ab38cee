use crate::domain::errors::StorageError;
use crate::domain::value_objects::{FolderPath, ObjectKey};

/// Result of a move, which is a copy followed by a delete of the source.
///
/// The two steps are not atomic. When the copy succeeds but the delete
/// fails, the destination object exists and the source is still there;
/// that state is reported rather than rolled back.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// Copy and delete both succeeded
    Moved,
    /// Copy succeeded, delete failed; both keys now hold the object
    SourceRetained {
        source: ObjectKey,
        error: StorageError,
    },
}

impl MoveOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// Operation applied uniformly to a batch of keys
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Copy each object into `destination` under its basename, then
    /// delete the source
    Move { destination: FolderPath },
    /// Copy each object into `destination` under its basename
    Copy { destination: FolderPath },
    Delete,
}
