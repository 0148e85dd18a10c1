//! Alarm name → routing rule lookup.

use tracing::debug;

use crate::error::ResolutionError;
use crate::types::{RoutingRule, RoutingTable};

/// Find the rule for `alarm_name`.
///
/// Scans in table order and returns the first exact match, so duplicate
/// names resolve to the earliest entry.
pub fn resolve<'t>(
    table: &'t RoutingTable,
    alarm_name: &str,
) -> Result<&'t RoutingRule, ResolutionError> {
    let rule = table
        .rules()
        .iter()
        .find(|r| r.alarm_name == alarm_name)
        .ok_or_else(|| ResolutionError::NotFound(alarm_name.to_string()))?;

    debug!(
        alarm = alarm_name,
        api_id = %rule.api_id,
        resource_id = %rule.resource_id,
        stage = %rule.stage_name,
        "resolved routing rule"
    );
    Ok(rule)
}
