//! Route switching against the API management service.
//!
//! A switch is two calls that form one unit of work:
//!
//! 1. patch the method integration so its URI invokes the chosen target
//! 2. create a deployment so the patched integration goes live on the stage
//!
//! The deployment is only attempted after the patch succeeded. If the
//! deployment fails the patch is not reverted; the error says so.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{error, info};

use crate::error::{BoxError, SwitchError};
use crate::types::{IntegrationRef, SwitchCommand};

/// Boxed future alias for management-API calls.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send + 'a>>;

/// Response of an integration patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationUpdate {
    /// URI the service reports after the patch, if any.
    pub uri: Option<String>,
}

/// Response of a stage deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deployment {
    pub id: Option<String>,
}

/// The two management-API operations a switch needs — injected for testability.
pub trait ManagementApi: Send + Sync {
    /// Replace the backend invocation URI of one method integration.
    fn update_integration_uri<'a>(
        &'a self,
        integration: IntegrationRef<'a>,
        uri: &'a str,
    ) -> ApiFuture<'a, IntegrationUpdate>;

    /// Republish `stage_name` of the API.
    fn create_deployment<'a>(
        &'a self,
        api_id: &'a str,
        stage_name: &'a str,
    ) -> ApiFuture<'a, Deployment>;
}

/// Outcome of a completed switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchResult {
    pub uri: String,
    pub deployment_id: Option<String>,
}

/// Lambda invocation URI for an API Gateway integration in `region`.
pub fn invocation_uri(region: &str, target_arn: &str) -> String {
    format!(
        "arn:aws:apigateway:{region}:lambda:path/2015-03-31/functions/{target_arn}/invocations"
    )
}

/// Applies switch commands through a [`ManagementApi`].
#[derive(Clone)]
pub struct RouteSwitcher {
    api: Arc<dyn ManagementApi>,
    region: String,
}

impl RouteSwitcher {
    pub fn new(api: Arc<dyn ManagementApi>, region: impl Into<String>) -> Self {
        Self {
            api,
            region: region.into(),
        }
    }

    /// URI the integration will be patched to for `command`.
    pub fn uri_for(&self, command: &SwitchCommand) -> String {
        invocation_uri(&self.region, &command.target_arn)
    }

    /// Patch the integration, then republish the stage.
    pub async fn apply(&self, command: &SwitchCommand) -> Result<SwitchResult, SwitchError> {
        let uri = self.uri_for(command);

        let update = self
            .api
            .update_integration_uri(command.integration(), &uri)
            .await
            .map_err(|source| SwitchError::IntegrationUpdateFailed {
                api_id: command.api_id.clone(),
                resource_id: command.resource_id.clone(),
                http_method: command.http_method.clone(),
                source,
            })?;

        info!(
            api_id = %command.api_id,
            resource_id = %command.resource_id,
            http_method = %command.http_method,
            uri = update.uri.as_deref().unwrap_or(&uri),
            "integration updated"
        );

        let deployment = match self
            .api
            .create_deployment(&command.api_id, &command.stage_name)
            .await
        {
            Ok(d) => d,
            Err(source) => {
                error!(
                    api_id = %command.api_id,
                    stage = %command.stage_name,
                    %uri,
                    integration_patched = true,
                    error = %source,
                    "stage deployment failed after integration update, integration is patched but not live"
                );
                return Err(SwitchError::DeploymentFailed {
                    api_id: command.api_id.clone(),
                    stage_name: command.stage_name.clone(),
                    uri,
                    source,
                });
            }
        };

        info!(
            api_id = %command.api_id,
            stage = %command.stage_name,
            deployment_id = deployment.id.as_deref().unwrap_or("-"),
            "stage redeployed"
        );

        Ok(SwitchResult {
            uri,
            deployment_id: deployment.id,
        })
    }
}
