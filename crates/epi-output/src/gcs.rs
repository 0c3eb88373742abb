//! Google Cloud Storage backend.
//!
//! Authentication and the upload protocol come from `object_store`'s GCS
//! client, which reads an application-default credentials file
//! (`service_account` or `authorized_user`) and manages access tokens. The
//! async client is driven from a private current-thread runtime so the rest
//! of the pipeline stays synchronous.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path as ObjectPath;
use object_store::{
    Attribute, Attributes, ClientOptions, ObjectStore as AsyncObjectStore, PutOptions, PutPayload,
};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::ObjectStore;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime used to drive async store clients from blocking code.
pub(crate) fn blocking_runtime() -> Result<Runtime, StoreError> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// Writes one object through an async store, blocking until it completes.
pub(crate) fn put_blocking<T>(
    runtime: &Runtime,
    store: &T,
    location: &str,
    key: &str,
    body: Vec<u8>,
    content_type: &str,
) -> Result<(), StoreError>
where
    T: AsyncObjectStore + ?Sized,
{
    let path = ObjectPath::parse(key).map_err(|source| StoreError::InvalidKey {
        key: key.to_string(),
        source,
    })?;
    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, content_type.to_string().into());
    let options = PutOptions {
        attributes,
        ..PutOptions::default()
    };

    runtime
        .block_on(store.put_opts(&path, PutPayload::from(body), options))
        .map_err(|source| StoreError::Backend {
            operation: "upload",
            location: location.to_string(),
            source,
        })?;
    Ok(())
}

/// GCS client with one configured store per bucket.
#[derive(Debug)]
pub struct GcsClient {
    runtime: Runtime,
    credentials: PathBuf,
    buckets: Mutex<HashMap<String, GoogleCloudStorage>>,
}

impl GcsClient {
    /// Creates a client authenticating with the credentials file at `path`.
    ///
    /// Only checks that the file is readable; its contents are validated by
    /// [`GcsClient::open_bucket`].
    pub fn from_credentials_file(path: &Path) -> Result<Self, StoreError> {
        fs::File::open(path).map_err(|source| StoreError::CredentialsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            runtime: blocking_runtime()?,
            credentials: path.to_path_buf(),
            buckets: Mutex::new(HashMap::new()),
        })
    }

    /// Configures (and caches) the store for `bucket`.
    ///
    /// This parses the credentials file but performs no network I/O; tokens
    /// are fetched on the first upload.
    pub fn open_bucket(&self, bucket: &str) -> Result<GoogleCloudStorage, StoreError> {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = buckets.get(bucket) {
            return Ok(store.clone());
        }

        let store = GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_application_credentials(self.credentials.display().to_string())
            .with_client_options(ClientOptions::new().with_timeout(REQUEST_TIMEOUT))
            .build()
            .map_err(|source| StoreError::Backend {
                operation: "configure",
                location: format!("gs://{bucket}"),
                source,
            })?;
        debug!(bucket, credentials = %self.credentials.display(), "bucket configured");
        buckets.insert(bucket.to_string(), store.clone());
        Ok(store)
    }
}

impl ObjectStore for GcsClient {
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let store = self.open_bucket(bucket)?;
        let location = format!("gs://{bucket}/{key}");
        let bytes = body.len();
        put_blocking(&self.runtime, &store, &location, key, body, content_type)?;
        info!(%location, bytes, "object uploaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn authorized_user_file(dir: &Path) -> PathBuf {
        let path = dir.join("adc.json");
        fs::write(
            &path,
            r#"{
                "type": "authorized_user",
                "client_id": "id.apps.googleusercontent.com",
                "client_secret": "secret",
                "refresh_token": "refresh"
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_put_blocking_writes_body_and_content_type() {
        let runtime = blocking_runtime().unwrap();
        let memory = InMemory::new();

        put_blocking(
            &runtime,
            &memory,
            "memory://transformed/a.csv",
            "transformed/a.csv",
            b"A,B\n1,2\n".to_vec(),
            "text/csv",
        )
        .unwrap();

        let stored = runtime
            .block_on(memory.get(&ObjectPath::from("transformed/a.csv")))
            .unwrap();
        let content_type: Option<&str> = stored
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| value.as_ref());
        assert_eq!(content_type, Some("text/csv"));
        let body = runtime.block_on(stored.bytes()).unwrap();
        assert_eq!(body.as_ref(), b"A,B\n1,2\n");
    }

    #[test]
    fn test_put_blocking_replaces_existing_object() {
        let runtime = blocking_runtime().unwrap();
        let memory = InMemory::new();

        for body in [b"old".to_vec(), b"new".to_vec()] {
            put_blocking(&runtime, &memory, "m://k.csv", "k.csv", body, "text/csv").unwrap();
        }

        let stored = runtime
            .block_on(memory.get(&ObjectPath::from("k.csv")))
            .unwrap();
        assert_eq!(runtime.block_on(stored.bytes()).unwrap().as_ref(), b"new");
    }

    #[test]
    fn test_put_blocking_rejects_relative_segments() {
        let runtime = blocking_runtime().unwrap();
        let memory = InMemory::new();

        let err = put_blocking(
            &runtime,
            &memory,
            "m://x",
            "transformed/../a.csv",
            Vec::new(),
            "text/csv",
        )
        .unwrap_err();

        assert!(
            matches!(err, StoreError::InvalidKey { ref key, .. } if key == "transformed/../a.csv")
        );
    }

    #[test]
    fn test_missing_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = GcsClient::from_credentials_file(&path).unwrap_err();

        assert!(matches!(err, StoreError::CredentialsIo { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_open_bucket_is_offline_and_cached() {
        let dir = tempfile::tempdir().unwrap();
        let client = GcsClient::from_credentials_file(&authorized_user_file(dir.path())).unwrap();

        client.open_bucket("etl-dp-bucket").unwrap();
        client.open_bucket("etl-dp-bucket").unwrap();

        let buckets = client.buckets.lock().unwrap();
        assert_eq!(buckets.len(), 1);
        assert!(buckets.contains_key("etl-dp-bucket"));
    }

    #[test]
    fn test_open_bucket_rejects_malformed_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        fs::write(&path, "not json").unwrap();
        let client = GcsClient::from_credentials_file(&path).unwrap();

        let err = client.open_bucket("etl-dp-bucket").unwrap_err();

        assert!(matches!(
            err,
            StoreError::Backend {
                operation: "configure",
                ..
            }
        ));
        assert!(client.buckets.lock().unwrap().is_empty());
    }
}
