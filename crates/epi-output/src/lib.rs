//! Loaders for the transformed epidemiological-week dataset.
//!
//! - **local**: comma-separated file on disk
//! - **remote**: dated upload of that file to an object store
//! - **store**: the object-store abstraction and its handles
//! - **gcs**: Google Cloud Storage backend

mod error;
pub mod gcs;
mod local;
mod remote;
pub mod store;

pub use error::{OutputError, Result, StoreError};
pub use gcs::GcsClient;
pub use local::{OUTPUT_SEPARATOR, write_dataset_csv};
pub use remote::{
    CSV_CONTENT_TYPE, DEFAULT_LAYER, RemoteTarget, UploadReceipt, local_csv_path, object_key,
    upload_transformed,
};
pub use store::{Bucket, ObjectRef, ObjectStore};
