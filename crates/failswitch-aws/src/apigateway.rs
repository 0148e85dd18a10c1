//! API Gateway (REST APIs) management client.

use aws_sdk_apigateway::Client;
use aws_sdk_apigateway::types::{Op, PatchOperation};
use failswitch_core::switcher::{ApiFuture, Deployment, IntegrationUpdate, ManagementApi};
use failswitch_core::{BoxError, IntegrationRef};
use tracing::debug;

/// JSON-pointer path of an integration's backend URI.
const URI_PATH: &str = "/uri";

/// Issues `UpdateIntegration` and `CreateDeployment` calls. Each call is
/// sent once; the SDK's own retry policy is the only retry.
#[derive(Debug, Clone)]
pub struct ApiGatewayClient {
    client: Client,
}

impl ApiGatewayClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// Patch operation replacing the integration URI.
fn replace_uri(uri: &str) -> PatchOperation {
    PatchOperation::builder()
        .op(Op::Replace)
        .path(URI_PATH)
        .value(uri)
        .build()
}

impl ManagementApi for ApiGatewayClient {
    fn update_integration_uri<'a>(
        &'a self,
        integration: IntegrationRef<'a>,
        uri: &'a str,
    ) -> ApiFuture<'a, IntegrationUpdate> {
        Box::pin(async move {
            let output = self
                .client
                .update_integration()
                .rest_api_id(integration.api_id)
                .resource_id(integration.resource_id)
                .http_method(integration.http_method)
                .patch_operations(replace_uri(uri))
                .send()
                .await
                .map_err(BoxError::from)?;

            debug!(
                api_id = integration.api_id,
                integration_type = ?output.r#type(),
                uri = output.uri().unwrap_or("-"),
                "update_integration response"
            );
            Ok::<_, BoxError>(IntegrationUpdate {
                uri: output.uri().map(str::to_string),
            })
        })
    }

    fn create_deployment<'a>(
        &'a self,
        api_id: &'a str,
        stage_name: &'a str,
    ) -> ApiFuture<'a, Deployment> {
        Box::pin(async move {
            let output = self
                .client
                .create_deployment()
                .rest_api_id(api_id)
                .stage_name(stage_name)
                .send()
                .await
                .map_err(BoxError::from)?;

            debug!(
                api_id,
                stage = stage_name,
                deployment_id = output.id().unwrap_or("-"),
                "create_deployment response"
            );
            Ok::<_, BoxError>(Deployment {
                id: output.id().map(str::to_string),
            })
        })
    }
}
