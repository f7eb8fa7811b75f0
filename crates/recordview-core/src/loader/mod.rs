//! Record loading.
//!
//! The loader fetches the raw record document from an object store and
//! decodes it. Two source strategies exist: a public remote object fetched
//! over HTTP(S) without credentials, and a bundled local file. Both are plain
//! [`ObjectStore`] implementations, so the rest of the crate never knows which
//! one is in use.

mod decode;

pub use decode::decode_records;

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use object_store::http::HttpBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path;
use object_store::{ClientOptions, ObjectStore};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::model::RecordCollection;

/// Default endpoint for public objects.
pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://storage.googleapis.com";

/// Default timeout for a remote fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Produces the record collection.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Fetch and decode the full record collection.
    async fn load(&self) -> Result<RecordCollection, LoadError>;
}

/// Where the record document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Public object fetched from `<endpoint>/<bucket>/<object>`.
    Remote {
        /// Base URL of the object endpoint.
        endpoint: String,
        /// Bucket name.
        bucket: String,
        /// Object name within the bucket.
        object: String,
        /// Upper bound on a single fetch.
        timeout: Duration,
    },
    /// Bundled JSON file.
    Local {
        /// Path to the file.
        path: PathBuf,
    },
}

impl SourceConfig {
    /// Remote source on the default endpoint with the default timeout.
    pub fn remote(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        SourceConfig::Remote {
            endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            bucket: bucket.into(),
            object: object.into(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    /// Local file source.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        SourceConfig::Local { path: path.into() }
    }
}

/// A record document stored at a location in an object store.
#[derive(Debug, Clone)]
pub struct RecordSource {
    store: Arc<dyn ObjectStore>,
    location: Path,
}

impl RecordSource {
    /// Create a source reading `location` from `store`.
    pub fn new(store: Arc<dyn ObjectStore>, location: Path) -> Self {
        Self { store, location }
    }

    /// Build the source described by `config`.
    pub fn from_config(config: &SourceConfig) -> Result<Self, LoadError> {
        match config {
            SourceConfig::Remote {
                endpoint,
                bucket,
                object,
                timeout,
            } => Self::remote(endpoint, bucket, object, *timeout),
            SourceConfig::Local { path } => Self::local(path),
        }
    }

    fn remote(
        endpoint: &str,
        bucket: &str,
        object: &str,
        timeout: Duration,
    ) -> Result<Self, LoadError> {
        if bucket.trim().is_empty() {
            return Err(LoadError::Config("remote source requires a bucket".to_string()));
        }
        if object.trim().is_empty() {
            return Err(LoadError::Config("remote source requires an object name".to_string()));
        }

        let url = format!("{}/{}", endpoint.trim_end_matches('/'), bucket.trim_matches('/'));
        let location = Path::parse(object)
            .map_err(|e| LoadError::Config(format!("invalid object name {:?}: {}", object, e)))?;

        let store = HttpBuilder::new()
            .with_url(url)
            .with_client_options(ClientOptions::new().with_timeout(timeout))
            .build()?;

        Ok(Self::new(Arc::new(store), location))
    }

    fn local(path: &FsPath) -> Result<Self, LoadError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| LoadError::Config(format!("invalid local path {}", path.display())))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => FsPath::new("."),
        };

        let store = LocalFileSystem::new_with_prefix(dir)?;
        Ok(Self::new(Arc::new(store), Path::from(file_name)))
    }

    /// Location of the document within its store.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

#[async_trait]
impl Loader for RecordSource {
    async fn load(&self) -> Result<RecordCollection, LoadError> {
        let started = Instant::now();

        let bytes = self.store.get(&self.location).await?.bytes().await?;
        debug!(
            store = %self.store,
            location = %self.location,
            bytes = bytes.len(),
            "Fetched record document"
        );

        let records = decode_records(&bytes)?;
        info!(
            location = %self.location,
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded record collection"
        );

        Ok(records)
    }
}
