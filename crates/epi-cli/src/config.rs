//! Run configuration and the credentials precondition.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use epi_model::ErrorKind;
use epi_output::{GcsClient, RemoteTarget, StoreError};
use thiserror::Error;

/// Environment variable naming the object-store credentials file.
pub const DEFAULT_CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_INPUT_FILE: &str = "def_semana_epidemiologica.csv";
pub const DEFAULT_OUTPUT_BASE: &str = "def_semana_epidemiologica_transformed";
pub const DEFAULT_BUCKET: &str = "etl-dp-bucket";

/// Everything a pipeline run needs besides the store and the run date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub raw_dir: PathBuf,
    pub transformed_dir: PathBuf,
    /// Raw file name inside `raw_dir`.
    pub input_file: String,
    /// Output name without extension.
    pub output_base: String,
    pub target: RemoteTarget,
}

impl PipelineConfig {
    /// Defaults rooted at `data_dir` (`<data_dir>/raw`, `<data_dir>/transformed`).
    pub fn from_data_dir(data_dir: &Path) -> Self {
        Self {
            raw_dir: data_dir.join("raw"),
            transformed_dir: data_dir.join("transformed"),
            input_file: DEFAULT_INPUT_FILE.to_string(),
            output_base: DEFAULT_OUTPUT_BASE.to_string(),
            target: RemoteTarget::new(DEFAULT_BUCKET),
        }
    }

    /// File name of the local transformed CSV.
    pub fn output_file_name(&self) -> String {
        format!("{}.csv", self.output_base)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_data_dir(Path::new(DEFAULT_DATA_DIR))
    }
}

/// Path taken from the credentials variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsPath(PathBuf);

impl CredentialsPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("environment variable {var} is not set")]
    MissingVar { var: String },

    #[error("environment variable {var} is empty")]
    EmptyVar { var: String },

    #[error("cannot use credentials {}: {source}", path.display())]
    UnusableCredentials {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

impl PreconditionError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Precondition
    }
}

/// Checks that `var` is set to a non-empty value.
///
/// `lookup` resolves variable names; pass `|name| std::env::var_os(name)` in
/// production.
pub fn check_credentials<F>(var: &str, lookup: F) -> Result<CredentialsPath, PreconditionError>
where
    F: Fn(&str) -> Option<OsString>,
{
    match lookup(var) {
        None => Err(PreconditionError::MissingVar {
            var: var.to_string(),
        }),
        Some(value) if value.is_empty() => Err(PreconditionError::EmptyVar {
            var: var.to_string(),
        }),
        Some(value) => Ok(CredentialsPath(PathBuf::from(value))),
    }
}

/// Opens the GCS client for `bucket` with the given credentials file.
///
/// The file is read and parsed here so a bad key is reported before any
/// stage runs. No network request is made.
pub fn open_store(
    credentials: &CredentialsPath,
    bucket: &str,
) -> Result<GcsClient, PreconditionError> {
    let unusable = |source| PreconditionError::UnusableCredentials {
        path: credentials.as_path().to_path_buf(),
        source,
    };
    let client = GcsClient::from_credentials_file(credentials.as_path()).map_err(unusable)?;
    client.open_bucket(bucket).map_err(unusable)?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();

        assert_eq!(config.raw_dir, PathBuf::from("data/raw"));
        assert_eq!(config.transformed_dir, PathBuf::from("data/transformed"));
        assert_eq!(
            config.output_file_name(),
            "def_semana_epidemiologica_transformed.csv"
        );
        assert_eq!(config.target.bucket, "etl-dp-bucket");
        assert_eq!(config.target.layer, "transformed");
    }

    #[test]
    fn test_credentials_present() {
        let path = check_credentials(DEFAULT_CREDENTIALS_VAR, |_| {
            Some(OsString::from("/secrets/key.json"))
        })
        .unwrap();

        assert_eq!(path.as_path(), Path::new("/secrets/key.json"));
    }

    #[test]
    fn test_credentials_missing() {
        let err = check_credentials(DEFAULT_CREDENTIALS_VAR, |_| None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(
            err.to_string(),
            "environment variable GOOGLE_APPLICATION_CREDENTIALS is not set"
        );
    }

    #[test]
    fn test_credentials_empty() {
        let err = check_credentials("ETL_KEY", |_| Some(OsString::new())).unwrap_err();

        assert!(matches!(err, PreconditionError::EmptyVar { ref var } if var == "ETL_KEY"));
    }

    #[test]
    fn test_lookup_receives_variable_name() {
        let result = check_credentials("ETL_KEY", |name| {
            (name == "ETL_KEY").then(|| OsString::from("k.json"))
        });

        assert!(result.is_ok());
    }

    #[test]
    fn test_unreadable_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let credentials = check_credentials(DEFAULT_CREDENTIALS_VAR, |_| {
            Some(dir.path().join("missing.json").into_os_string())
        })
        .unwrap();

        let err = open_store(&credentials, DEFAULT_BUCKET).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(matches!(
            err,
            PreconditionError::UnusableCredentials {
                source: StoreError::CredentialsIo { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, "{}").unwrap();
        let credentials =
            check_credentials("ETL_KEY", |_| Some(path.clone().into_os_string())).unwrap();

        let err = open_store(&credentials, DEFAULT_BUCKET).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(err.to_string().starts_with("cannot use credentials "));
    }
}
