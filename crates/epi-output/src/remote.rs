//! Upload of the transformed file to the object store.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{OutputError, Result};
use crate::store::ObjectStore;

/// Content type of uploaded objects.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Default key prefix of uploaded objects.
pub const DEFAULT_LAYER: &str = "transformed";

/// Where transformed files are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub bucket: String,
    /// Key prefix (folder) inside the bucket.
    pub layer: String,
}

impl RemoteTarget {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            layer: DEFAULT_LAYER.to_string(),
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub uri: String,
    pub key: String,
    pub bytes: u64,
}

/// Local path of the transformed file `base_name`.
pub fn local_csv_path(local_dir: &Path, base_name: &str) -> PathBuf {
    local_dir.join(format!("{base_name}.csv"))
}

/// Object key `<layer>/<base_name>_<YYYY-MM-DD>.csv`.
pub fn object_key(layer: &str, base_name: &str, run_date: NaiveDate) -> String {
    format!("{layer}/{base_name}_{}.csv", run_date.format("%Y-%m-%d"))
}

/// Uploads `<local_dir>/<base_name>.csv` as a dated object.
///
/// The local file is checked before the store is touched. Store failures are
/// returned as-is; nothing is retried.
pub fn upload_transformed<S: ObjectStore>(
    store: &S,
    target: &RemoteTarget,
    local_dir: &Path,
    base_name: &str,
    run_date: NaiveDate,
) -> Result<UploadReceipt> {
    let local = local_csv_path(local_dir, base_name);
    if !local.is_file() {
        return Err(OutputError::LocalFileNotFound { path: local });
    }

    let key = object_key(&target.layer, base_name, run_date);
    let bucket = store.bucket(&target.bucket);
    let object = bucket.object(&key);
    let bytes = object.upload_from_path(&local, CSV_CONTENT_TYPE)?;
    let uri = object.uri();

    info!(local = %local.display(), %uri, bytes, "transformed file uploaded");
    Ok(UploadReceipt { uri, key, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();

        assert_eq!(
            object_key("transformed", "def_semana_epidemiologica_transformed", date),
            "transformed/def_semana_epidemiologica_transformed_2026-03-07.csv"
        );
    }

    #[test]
    fn test_local_csv_path() {
        assert_eq!(
            local_csv_path(Path::new("data/transformed"), "semana"),
            PathBuf::from("data/transformed/semana.csv")
        );
    }

    #[test]
    fn test_remote_target_defaults() {
        let target = RemoteTarget::new("etl-dp-bucket");
        assert_eq!(target.layer, "transformed");
        assert_eq!(target.with_layer("curated").layer, "curated");
    }
}
