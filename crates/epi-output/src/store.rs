//! Object-store abstraction.
//!
//! Backends implement a single [`ObjectStore::put_object`]; callers navigate
//! to an object through the borrowed [`Bucket`] and [`ObjectRef`] handles.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::StoreError;

/// A store of named byte objects grouped in buckets.
pub trait ObjectStore {
    /// Stores `body` under `key` in `bucket`, replacing any existing object.
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// URI scheme used when reporting object locations.
    fn scheme(&self) -> &'static str {
        "gs"
    }

    /// Resolves a bucket handle. No I/O happens until an upload.
    fn bucket<'a>(&'a self, name: &'a str) -> Bucket<'a, Self>
    where
        Self: Sized,
    {
        Bucket { store: self, name }
    }
}

/// Borrowed handle to one bucket of a store.
#[derive(Debug)]
pub struct Bucket<'a, S> {
    store: &'a S,
    name: &'a str,
}

impl<'a, S: ObjectStore> Bucket<'a, S> {
    pub fn name(&self) -> &str {
        self.name
    }

    /// Resolves an object handle inside this bucket.
    pub fn object(&self, key: &'a str) -> ObjectRef<'a, S> {
        ObjectRef {
            store: self.store,
            bucket: self.name,
            key,
        }
    }
}

/// Borrowed handle to one object key.
#[derive(Debug)]
pub struct ObjectRef<'a, S> {
    store: &'a S,
    bucket: &'a str,
    key: &'a str,
}

impl<S: ObjectStore> ObjectRef<'_, S> {
    pub fn key(&self) -> &str {
        self.key
    }

    /// Location of the object, e.g. `gs://bucket/layer/file.csv`.
    pub fn uri(&self) -> String {
        format!("{}://{}/{}", self.store.scheme(), self.bucket, self.key)
    }

    /// Uploads the exact bytes of the file at `path`.
    ///
    /// # Returns
    ///
    /// Number of bytes uploaded.
    pub fn upload_from_path(&self, path: &Path, content_type: &str) -> Result<u64, StoreError> {
        let body = fs::read(path)?;
        let len = body.len() as u64;
        debug!(
            bucket = self.bucket,
            key = self.key,
            bytes = len,
            "uploading object"
        );
        self.store
            .put_object(self.bucket, self.key, body, content_type)?;
        Ok(len)
    }
}
