//! failswitch-aws — AWS implementations of the FailSwitch collaborators.
//!
//! - [`S3ObjectStore`] reads the routing document from S3.
//! - [`ApiGatewayClient`] patches REST API integrations and redeploys stages.
//!
//! Both are built from one [`aws_config::SdkConfig`] pinned to the
//! configured region, see [`load_sdk_config`].

pub mod apigateway;
pub mod s3;

pub use apigateway::ApiGatewayClient;
pub use s3::S3ObjectStore;

use aws_config::{BehaviorVersion, Region};
use tracing::debug;

/// Load the shared SDK configuration (credentials chain, retries) for `region`.
pub async fn load_sdk_config(region: &str) -> aws_config::SdkConfig {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    debug!(region, "aws sdk config loaded");
    config
}
