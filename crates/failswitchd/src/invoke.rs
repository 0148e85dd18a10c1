//! One-shot local invocation.

use std::path::Path;

use anyhow::Context;
use failswitch_core::Orchestrator;
use serde_json::json;

/// Handle the event stored at `event_path`, printing the outcome to stdout.
///
/// With `dry_run` the planned switch is printed as JSON and no management
/// API call is made.
pub async fn run(orchestrator: &Orchestrator, event_path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let event = read_event(event_path)?;

    if dry_run {
        let plan = orchestrator
            .plan(&event)
            .await
            .context("failed to plan route switch")?;
        let out = json!({
            "alarmName": plan.alarm.alarm_name,
            "state": plan.alarm.state.to_string(),
            "target": plan.target.to_string(),
            "command": plan.command,
            "uri": plan.uri,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let message = orchestrator.handle(&event).await?;
    println!("{message}");
    Ok(())
}

fn read_event(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("event file {} is not valid JSON", path.display()))
}
