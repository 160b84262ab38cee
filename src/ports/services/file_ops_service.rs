use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    models::{BatchOperation, MoveOutcome},
    value_objects::{FolderPath, ObjectKey},
};

/// Port for folder management and object transfer operations
#[async_trait]
pub trait FileOpsService: Send + Sync + 'static {
    /// Materialize a folder by writing its placeholder marker object.
    /// Validates the folder name first. Idempotent.
    async fn create_folder(&self, path: &FolderPath) -> StorageResult<()>;

    /// Delete every object under the folder prefix, markers included.
    /// Returns how many objects were removed; an already-empty folder
    /// is a success with zero removals.
    async fn delete_folder(&self, path: &FolderPath) -> StorageResult<usize>;

    /// Move one object: copy to the destination key, then delete the
    /// source. See [`MoveOutcome`] for the partial-failure contract.
    async fn move_file(
        &self,
        source: &ObjectKey,
        destination: &ObjectKey,
    ) -> StorageResult<MoveOutcome>;

    /// Copy one object to a new key
    async fn copy_file(
        &self,
        source: &ObjectKey,
        destination: &ObjectKey,
    ) -> StorageResult<()>;

    /// Rename is a move under a different key in place
    async fn rename_file(
        &self,
        source: &ObjectKey,
        destination: &ObjectKey,
    ) -> StorageResult<MoveOutcome>;

    /// Apply one operation to many keys concurrently. Every request runs
    /// to completion before the first failure, if any, is reported.
    async fn batch_operation(
        &self,
        keys: &[ObjectKey],
        operation: BatchOperation,
    ) -> StorageResult<()>;
}
