//! Object storage access for the routing configuration.
//!
//! [`ObjectStore`] is the seam between the config repository and wherever
//! the document actually lives. `failswitch-aws` implements it for S3;
//! [`FsObjectStore`] serves objects from a local directory for rehearsals
//! and tests.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::debug;

use crate::error::BoxError;
use crate::types::ConfigLocation;

/// Boxed future alias for object fetches.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>, BoxError>> + Send + 'a>>;

/// Read-only access to objects in a bucket — injected for testability.
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object body. `Ok(None)` means the object does not exist.
    fn fetch<'a>(&'a self, location: &'a ConfigLocation) -> FetchFuture<'a>;
}

/// Serves objects from `{root}/{bucket}/{key}` on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, location: &ConfigLocation) -> Result<PathBuf, BoxError> {
        let key = Path::new(&location.key);
        let escapes = Path::new(&location.bucket)
            .components()
            .chain(key.components())
            .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if escapes {
            return Err(format!(
                "object location {}/{} must be relative and must not contain '..'",
                location.bucket, location.key
            )
            .into());
        }
        Ok(self.root.join(&location.bucket).join(key))
    }
}

impl ObjectStore for FsObjectStore {
    fn fetch<'a>(&'a self, location: &'a ConfigLocation) -> FetchFuture<'a> {
        Box::pin(async move {
            let path = self.object_path(location)?;
            let result: Result<Option<Vec<u8>>, BoxError> = match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    debug!(path = ?path, len = bytes.len(), "read object from filesystem");
                    Ok(Some(bytes))
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            };
            result
        })
    }
}
