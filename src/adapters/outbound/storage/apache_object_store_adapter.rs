use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    path::Path as ObjectPath, signer::Signer, Attribute, AttributeValue, Attributes,
    ObjectMeta, ObjectStore as ApacheObjectStore, PutOptions, PutPayload,
};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        value_objects::{FolderPath, ObjectKey},
    },
    ports::storage::{ObjectInfo, ObjectStore, PrefixListing, PutObjectOptions, StoredObject},
};

/// Adapter that implements our ObjectStore port using Apache object_store.
///
/// URL signing is optional because not every backend can sign; the S3
/// client doubles as its own signer, the in-memory store has none.
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    signer: Option<Arc<dyn Signer>>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self {
            inner: store,
            signer: None,
        }
    }

    pub fn with_signer(store: Arc<dyn ApacheObjectStore>, signer: Arc<dyn Signer>) -> Self {
        Self {
            inner: store,
            signer: Some(signer),
        }
    }

    fn object_path(key: &ObjectKey) -> ObjectPath {
        ObjectPath::from(key.as_str())
    }

    fn prefix_path(prefix: &FolderPath) -> Option<ObjectPath> {
        if prefix.is_root() {
            None
        } else {
            Some(ObjectPath::from(prefix.as_str()))
        }
    }

    fn object_info(meta: ObjectMeta) -> StorageResult<ObjectInfo> {
        let key = ObjectKey::new(meta.location.to_string())?;
        Ok(ObjectInfo {
            key,
            size: meta.size,
            last_modified: meta.last_modified,
            etag: meta.e_tag,
        })
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: PutObjectOptions,
    ) -> StorageResult<()> {
        let path = Self::object_path(key);

        let mut attributes = Attributes::new();
        if let Some(content_type) = options.content_type {
            attributes.insert(Attribute::ContentType, AttributeValue::from(content_type));
        }
        for (name, value) in options.metadata {
            attributes.insert(Attribute::Metadata(name.into()), AttributeValue::from(value));
        }

        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&path, PutPayload::from(data), opts)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn get_object(&self, key: &ObjectKey) -> StorageResult<StoredObject> {
        let path = Self::object_path(key);

        let result = self.inner.get(&path).await.map_err(StorageError::from)?;
        let attributes = result.attributes.clone();
        let data = result.bytes().await.map_err(StorageError::from)?;

        let mut content_type = None;
        let mut metadata = HashMap::new();
        for (attribute, value) in attributes.iter() {
            match attribute {
                Attribute::ContentType => content_type = Some(value.to_string()),
                Attribute::Metadata(name) => {
                    metadata.insert(name.to_string(), value.to_string());
                }
                _ => {}
            }
        }

        Ok(StoredObject {
            data,
            content_type,
            metadata,
        })
    }

    async fn head_object(&self, key: &ObjectKey) -> StorageResult<ObjectInfo> {
        let path = Self::object_path(key);
        let meta = self.inner.head(&path).await.map_err(StorageError::from)?;
        Self::object_info(meta)
    }

    async fn object_exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        let path = Self::object_path(key);

        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    async fn delete_object(&self, key: &ObjectKey) -> StorageResult<()> {
        let path = Self::object_path(key);
        self.inner.delete(&path).await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn copy_object(
        &self,
        source_key: &ObjectKey,
        destination_key: &ObjectKey,
    ) -> StorageResult<()> {
        let source = Self::object_path(source_key);
        let destination = Self::object_path(destination_key);

        self.inner
            .copy(&source, &destination)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn list_prefix(
        &self,
        prefix: &FolderPath,
        max_results: Option<usize>,
    ) -> StorageResult<Vec<ObjectInfo>> {
        let prefix_path = Self::prefix_path(prefix);

        let mut stream = self.inner.list(prefix_path.as_ref());
        let mut objects = Vec::new();

        while let Some(result) = futures::StreamExt::next(&mut stream).await {
            if let Some(max) = max_results {
                if objects.len() >= max {
                    break;
                }
            }

            let meta = result.map_err(StorageError::from)?;
            objects.push(Self::object_info(meta)?);
        }

        Ok(objects)
    }

    async fn list_with_delimiter(
        &self,
        prefix: &FolderPath,
        max_results: Option<usize>,
    ) -> StorageResult<PrefixListing> {
        let prefix_path = Self::prefix_path(prefix);

        let result = self
            .inner
            .list_with_delimiter(prefix_path.as_ref())
            .await
            .map_err(StorageError::from)?;

        let mut objects = Vec::new();
        for meta in result.objects {
            if let Some(max) = max_results {
                if objects.len() >= max {
                    break;
                }
            }
            objects.push(Self::object_info(meta)?);
        }

        let common_prefixes = result
            .common_prefixes
            .iter()
            .map(|p| FolderPath::parse(p.as_ref()))
            .collect();

        Ok(PrefixListing {
            objects,
            common_prefixes,
        })
    }

    async fn presigned_get_url(
        &self,
        key: &ObjectKey,
        expires_in: Duration,
    ) -> StorageResult<String> {
        match &self.signer {
            Some(signer) => {
                let path = Self::object_path(key);
                let url = signer
                    .signed_url(http::Method::GET, &path, expires_in)
                    .await
                    .map_err(StorageError::from)?;
                Ok(url.to_string())
            }
            None => Err(StorageError::Unknown {
                message: format!("Backend cannot sign URLs for object: {}", key),
            }),
        }
    }
}
