//! Lambda runtime loop.

use failswitch_core::Orchestrator;
use lambda_runtime::{LambdaEvent, service_fn};
use tracing::info;

/// Serve invocations until the runtime shuts the process down.
pub async fn serve(orchestrator: Orchestrator) -> anyhow::Result<()> {
    info!("lambda runtime starting");

    let orchestrator = &orchestrator;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
        handle(orchestrator, event).await
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

async fn handle(
    orchestrator: &Orchestrator,
    event: LambdaEvent<serde_json::Value>,
) -> Result<String, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "invocation started");

    let message = orchestrator.handle(&payload).await?;
    Ok(message)
}
