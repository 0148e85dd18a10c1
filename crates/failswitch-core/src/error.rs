//! Error types for the failover pipeline.
//!
//! Each stage has its own error enum. [`FailoverError`] aggregates them
//! inside the orchestrator and [`InvocationError`] is the single failure
//! reported to whoever invoked the handler.

use thiserror::Error;

/// Opaque failure reported by an external collaborator (object store,
/// management API).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The inbound event does not carry the alarm identity.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
}

/// The routing configuration could not be loaded.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("routing configuration not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("routing configuration is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read routing configuration {bucket}/{key}")]
    Unavailable {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },
}

/// No routing rule matches the alarm.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no routing rule found for alarm: {0}")]
    NotFound(String),
}

/// A management-API call failed while switching the route.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("failed to update integration {api_id}/{resource_id} {http_method}")]
    IntegrationUpdateFailed {
        api_id: String,
        resource_id: String,
        http_method: String,
        #[source]
        source: BoxError,
    },

    /// The integration already points at `uri`; only the republish failed.
    #[error("integration patched to {uri} but deployment of {api_id} stage {stage_name} failed")]
    DeploymentFailed {
        api_id: String,
        stage_name: String,
        uri: String,
        #[source]
        source: BoxError,
    },
}

/// Any failure inside one invocation.
#[derive(Debug, Error)]
pub enum FailoverError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Switch(#[from] SwitchError),
}

/// Outward-facing failure of an invocation. The cause is kept as the source.
#[derive(Debug, Error)]
#[error("failed to update API gateway route")]
pub struct InvocationError {
    #[source]
    pub cause: FailoverError,
}

impl From<FailoverError> for InvocationError {
    fn from(cause: FailoverError) -> Self {
        Self { cause }
    }
}

impl SwitchError {
    /// Whether the integration was left patched without a live deployment.
    pub fn is_partial(&self) -> bool {
        matches!(self, SwitchError::DeploymentFailed { .. })
    }
}
