//! Routing configuration repository.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::RepositoryError;
use crate::store::ObjectStore;
use crate::types::{ConfigLocation, RoutingTable};

/// Loads the routing table from a fixed object location.
///
/// Nothing is cached: every [`load`](Self::load) reads and parses the
/// document again.
#[derive(Clone)]
pub struct ConfigRepository {
    store: Arc<dyn ObjectStore>,
    location: ConfigLocation,
}

impl ConfigRepository {
    pub fn new(store: Arc<dyn ObjectStore>, location: ConfigLocation) -> Self {
        Self { store, location }
    }

    /// Fetch and parse the routing table.
    pub async fn load(&self) -> Result<RoutingTable, RepositoryError> {
        let bytes = self
            .store
            .fetch(&self.location)
            .await
            .map_err(|source| RepositoryError::Unavailable {
                bucket: self.location.bucket.clone(),
                key: self.location.key.clone(),
                source,
            })?
            .ok_or_else(|| RepositoryError::NotFound {
                bucket: self.location.bucket.clone(),
                key: self.location.key.clone(),
            })?;

        let table = RoutingTable::from_json_slice(&bytes)?;

        for name in table.duplicate_names() {
            warn!(
                alarm = name,
                bucket = %self.location.bucket,
                key = %self.location.key,
                "duplicate routing rule, only the first entry is used"
            );
        }

        debug!(
            bucket = %self.location.bucket,
            key = %self.location.key,
            rules = table.len(),
            "routing configuration loaded"
        );
        Ok(table)
    }
}
