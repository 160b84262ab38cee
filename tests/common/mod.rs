#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;

use object_store_fs::{
    ApacheObjectStoreAdapter, AppBuilder, AppServices, FolderPath, ObjectInfo, ObjectKey,
    ObjectStore, PrefixListing, PutObjectOptions, StorageError, StoragePolicy, StorageResult,
    StoredObject, UploadRequest,
};

/// In-memory store wrapper with programmable failures.
///
/// Each operation kind has a queue of slots, one consumed per request:
/// `Some(error)` fails that request, `None` lets it through. Once the
/// queue drains the wrapped store answers normally again.
pub struct FlakyStore {
    inner: ApacheObjectStoreAdapter,
    fail_puts: Mutex<Vec<Option<StorageError>>>,
    fail_lists: Mutex<Vec<Option<StorageError>>>,
    fail_deletes: Mutex<HashMap<String, StorageError>>,
    puts_attempted: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: ApacheObjectStoreAdapter::new(Arc::new(InMemory::new())),
            fail_puts: Mutex::new(Vec::new()),
            fail_lists: Mutex::new(Vec::new()),
            fail_deletes: Mutex::new(HashMap::new()),
            puts_attempted: AtomicUsize::new(0),
        }
    }

    /// Queue failures for the next `count` put requests
    pub fn fail_next_puts(&self, count: usize, error: StorageError) {
        let mut queue = self.fail_puts.lock().unwrap();
        for _ in 0..count {
            queue.push(Some(error.clone()));
        }
    }

    /// Queue failures for the next `count` list requests
    pub fn fail_next_lists(&self, count: usize, error: StorageError) {
        let mut queue = self.fail_lists.lock().unwrap();
        for _ in 0..count {
            queue.push(Some(error.clone()));
        }
    }

    /// Let the next `count` list requests through before any queued
    /// failure applies
    pub fn pass_next_lists(&self, count: usize) {
        let mut queue = self.fail_lists.lock().unwrap();
        for _ in 0..count {
            queue.push(None);
        }
    }

    /// Make every delete of `key` fail until further notice
    pub fn fail_deletes_of(&self, key: &ObjectKey, error: StorageError) {
        self.fail_deletes
            .lock()
            .unwrap()
            .insert(key.as_str().to_string(), error);
    }

    /// Total put requests seen, including failed ones
    pub fn puts_attempted(&self) -> usize {
        self.puts_attempted.load(Ordering::SeqCst)
    }

    fn next_failure(queue: &Mutex<Vec<Option<StorageError>>>) -> Option<StorageError> {
        let mut queue = queue.lock().unwrap();
        if queue.is_empty() {
            None
        } else {
            queue.remove(0)
        }
    }
}

#[async_trait]
impl ObjectStore for FlakyStore {
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: PutObjectOptions,
    ) -> StorageResult<()> {
        self.puts_attempted.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = Self::next_failure(&self.fail_puts) {
            return Err(error);
        }
        self.inner.put_object(key, data, options).await
    }

    async fn get_object(&self, key: &ObjectKey) -> StorageResult<StoredObject> {
        self.inner.get_object(key).await
    }

    async fn head_object(&self, key: &ObjectKey) -> StorageResult<ObjectInfo> {
        self.inner.head_object(key).await
    }

    async fn object_exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        self.inner.object_exists(key).await
    }

    async fn delete_object(&self, key: &ObjectKey) -> StorageResult<()> {
        let failure = self.fail_deletes.lock().unwrap().get(key.as_str()).cloned();
        if let Some(error) = failure {
            return Err(error);
        }
        self.inner.delete_object(key).await
    }

    async fn copy_object(
        &self,
        source_key: &ObjectKey,
        destination_key: &ObjectKey,
    ) -> StorageResult<()> {
        self.inner.copy_object(source_key, destination_key).await
    }

    async fn list_prefix(
        &self,
        prefix: &FolderPath,
        max_results: Option<usize>,
    ) -> StorageResult<Vec<ObjectInfo>> {
        if let Some(error) = Self::next_failure(&self.fail_lists) {
            return Err(error);
        }
        self.inner.list_prefix(prefix, max_results).await
    }

    async fn list_with_delimiter(
        &self,
        prefix: &FolderPath,
        max_results: Option<usize>,
    ) -> StorageResult<PrefixListing> {
        if let Some(error) = Self::next_failure(&self.fail_lists) {
            return Err(error);
        }
        self.inner.list_with_delimiter(prefix, max_results).await
    }

    async fn presigned_get_url(
        &self,
        key: &ObjectKey,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.inner.presigned_get_url(key, expires_in).await
    }
}

/// Services over a fresh in-memory store
pub fn in_memory_services() -> AppServices {
    AppBuilder::new().build().unwrap()
}

/// Services over the given store
pub fn services_over(store: Arc<dyn ObjectStore>) -> AppServices {
    AppBuilder::new().with_store(store).build().unwrap()
}

/// Services over a flaky store, returned alongside it for failure
/// programming
pub fn flaky_services() -> (Arc<FlakyStore>, AppServices) {
    let store = Arc::new(FlakyStore::new());
    let services = services_over(store.clone());
    (store, services)
}

pub fn flaky_services_with_policy(policy: StoragePolicy) -> (Arc<FlakyStore>, AppServices) {
    let store = Arc::new(FlakyStore::new());
    let services = AppBuilder::new()
        .with_store(store.clone())
        .with_policy(policy)
        .build()
        .unwrap();
    (store, services)
}

/// Write a file straight into the store, bypassing upload validation
pub async fn seed_file(services: &AppServices, key: &str, data: &[u8]) {
    let key = ObjectKey::new(key.to_string()).unwrap();
    services
        .handle
        .store()
        .await
        .put_object(
            &key,
            Bytes::copy_from_slice(data),
            PutObjectOptions::default(),
        )
        .await
        .unwrap();
}

/// Read a file straight from the store
pub async fn read_file(services: &AppServices, key: &str) -> Bytes {
    let key = ObjectKey::new(key.to_string()).unwrap();
    services
        .handle
        .store()
        .await
        .get_object(&key)
        .await
        .unwrap()
        .data
}

pub async fn file_exists(services: &AppServices, key: &str) -> bool {
    let key = ObjectKey::new(key.to_string()).unwrap();
    services
        .handle
        .store()
        .await
        .object_exists(&key)
        .await
        .unwrap()
}

/// Upload request whose file name matches the target basename
pub fn upload_request(key: &str, content_type: &str, data: &[u8]) -> UploadRequest {
    let target = ObjectKey::new(key.to_string()).unwrap();
    UploadRequest {
        file_name: target.basename().to_string(),
        target,
        content_type: content_type.to_string(),
        data: Bytes::copy_from_slice(data),
    }
}
