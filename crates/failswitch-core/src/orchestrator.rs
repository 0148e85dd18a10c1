//! Orchestrator — drives one failover invocation end to end.
//!
//! ```text
//! Start → Parsed → ConfigLoaded → Resolved → TargetSelected → Switched → Done
//!   └──────────┴─────────┴────────────┴─────────────┴──────────→ Failed
//! ```
//!
//! Every stage can short-circuit to `Failed`. Failures are logged once here
//! and returned as a single [`InvocationError`] that keeps the cause.

use tracing::{debug, error, info};

use crate::error::{FailoverError, InvocationError};
use crate::event::AlarmEvent;
use crate::repository::ConfigRepository;
use crate::resolver;
use crate::selector::{self, TargetKind};
use crate::switcher::{RouteSwitcher, SwitchResult};
use crate::types::SwitchCommand;

/// What an invocation would do, computed without touching the managed API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPlan {
    pub alarm: AlarmEvent,
    pub target: TargetKind,
    pub command: SwitchCommand,
    /// Integration URI the command resolves to.
    pub uri: String,
}

/// Holds the collaborators for an invocation. Built once at startup and
/// shared across invocations; it carries no per-invocation state.
#[derive(Clone)]
pub struct Orchestrator {
    repository: ConfigRepository,
    switcher: RouteSwitcher,
}

impl Orchestrator {
    pub fn new(repository: ConfigRepository, switcher: RouteSwitcher) -> Self {
        Self {
            repository,
            switcher,
        }
    }

    /// Parse, load, resolve, and select. No management-API calls are made.
    pub async fn plan(&self, raw: &serde_json::Value) -> Result<SwitchPlan, FailoverError> {
        let alarm = AlarmEvent::from_value(raw)?;
        info!(
            alarm = %alarm.alarm_name,
            state = %alarm.state,
            alarm_arn = alarm.alarm_arn.as_deref().unwrap_or("-"),
            reason = alarm.reason.as_deref().unwrap_or("-"),
            "alarm parsed"
        );

        let table = self.repository.load().await?;
        let rule = resolver::resolve(&table, &alarm.alarm_name)?;
        let target = selector::select(rule, &alarm.state);
        let command = SwitchCommand::from_rule(rule, target.arn);
        let uri = self.switcher.uri_for(&command);

        info!(
            alarm = %alarm.alarm_name,
            api_id = %command.api_id,
            resource_id = %command.resource_id,
            target = %target.kind,
            target_arn = %command.target_arn,
            "switching route"
        );

        Ok(SwitchPlan {
            target: target.kind,
            alarm,
            command,
            uri,
        })
    }

    /// Run the full invocation and report one outcome.
    pub async fn handle(&self, raw: &serde_json::Value) -> Result<String, InvocationError> {
        debug!(event = %raw, "event received");

        match self.run(raw).await {
            Ok((plan, result)) => {
                info!(
                    alarm = %plan.alarm.alarm_name,
                    uri = %result.uri,
                    deployment_id = result.deployment_id.as_deref().unwrap_or("-"),
                    "route switched"
                );
                Ok(format!(
                    "route updated successfully for alarm {}",
                    plan.alarm.alarm_name
                ))
            }
            Err(e) => {
                let partial = matches!(&e, FailoverError::Switch(s) if s.is_partial());
                let cause = std::error::Error::source(&e)
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                error!(error = %e, %cause, partial, "failed to process alarm");
                Err(InvocationError::from(e))
            }
        }
    }

    async fn run(
        &self,
        raw: &serde_json::Value,
    ) -> Result<(SwitchPlan, SwitchResult), FailoverError> {
        let plan = self.plan(raw).await?;
        let result = self.switcher.apply(&plan.command).await?;
        Ok((plan, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::error::{ParseError, RepositoryError, ResolutionError, SwitchError};
    use crate::switcher::invocation_uri;
    use crate::testing::{ApiCall, MemoryStore, RecordingApi};
    use crate::types::ConfigLocation;

    const REGION: &str = "us-east-1";

    fn config() -> String {
        json!({
            "alarms": [
                {
                    "alarmName": "cpu-high",
                    "apiId": "api1",
                    "resourceId": "res1",
                    "httpMethod": "POST",
                    "stageName": "prod",
                    "mainLambdaArn": "mainArn",
                    "fallbackLambdaArn": "fallbackArn"
                },
                {
                    "alarmName": "latency",
                    "apiId": "api2",
                    "resourceId": "res2",
                    "httpMethod": "GET",
                    "stageName": "live",
                    "mainLambdaArn": "main2",
                    "fallbackLambdaArn": "fallback2"
                }
            ]
        })
        .to_string()
    }

    fn event(name: &str, state: &str) -> serde_json::Value {
        json!({ "alarmData": { "alarmName": name, "state": { "value": state } } })
    }

    fn setup(
        store: MemoryStore,
        api: RecordingApi,
    ) -> (Orchestrator, Arc<MemoryStore>, Arc<RecordingApi>) {
        let store = Arc::new(store);
        let api = Arc::new(api);
        let orch = Orchestrator::new(
            ConfigRepository::new(store.clone(), ConfigLocation::new("bucket", "alarms.json")),
            RouteSwitcher::new(api.clone(), REGION),
        );
        (orch, store, api)
    }

    #[tokio::test]
    async fn alarm_switches_to_fallback() {
        let (orch, _, api) = setup(MemoryStore::with_body(config()), RecordingApi::default());

        let msg = orch.handle(&event("cpu-high", "ALARM")).await.unwrap();
        assert!(msg.contains("cpu-high"));
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::UpdateIntegration {
                    api_id: "api1".to_string(),
                    resource_id: "res1".to_string(),
                    http_method: "POST".to_string(),
                    uri: invocation_uri(REGION, "fallbackArn"),
                },
                ApiCall::CreateDeployment {
                    api_id: "api1".to_string(),
                    stage_name: "prod".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn ok_switches_back_to_main() {
        let (orch, _, api) = setup(MemoryStore::with_body(config()), RecordingApi::default());

        orch.handle(&event("latency", "OK")).await.unwrap();
        match &api.calls()[0] {
            ApiCall::UpdateIntegration { api_id, uri, .. } => {
                assert_eq!(api_id, "api2");
                assert_eq!(uri, &invocation_uri(REGION, "main2"));
            }
            other => panic!("unexpected first call {other:?}"),
        }
    }

    #[tokio::test]
    async fn parse_failure_touches_nothing() {
        let (orch, store, api) = setup(MemoryStore::with_body(config()), RecordingApi::default());

        let err = orch
            .handle(&json!({ "alarmData": { "alarmName": "cpu-high" } }))
            .await
            .unwrap_err();
        assert!(matches!(err.cause, FailoverError::Parse(ParseError::MissingField(_))));
        assert_eq!(store.fetches(), 0);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_alarm_makes_no_api_calls() {
        let (orch, store, api) = setup(MemoryStore::with_body(config()), RecordingApi::default());

        let err = orch.handle(&event("unknown-alarm", "ALARM")).await.unwrap_err();
        assert!(matches!(
            err.cause,
            FailoverError::Resolution(ResolutionError::NotFound(ref n)) if n == "unknown-alarm"
        ));
        assert_eq!(store.fetches(), 1);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_config_fails_before_switch() {
        let (orch, _, api) = setup(MemoryStore::default(), RecordingApi::default());

        let err = orch.handle(&event("cpu-high", "ALARM")).await.unwrap_err();
        assert!(matches!(
            err.cause,
            FailoverError::Repository(RepositoryError::NotFound { .. })
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn deployment_failure_is_reported_as_partial() {
        let (orch, _, api) = setup(
            MemoryStore::with_body(config()),
            RecordingApi::failing_deployment("LimitExceeded"),
        );

        let err = orch.handle(&event("cpu-high", "ALARM")).await.unwrap_err();
        match &err.cause {
            FailoverError::Switch(s @ SwitchError::DeploymentFailed { .. }) => {
                assert!(s.is_partial())
            }
            other => panic!("expected deployment failure, got {other:?}"),
        }
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn plan_has_no_side_effects() {
        let (orch, _, api) = setup(MemoryStore::with_body(config()), RecordingApi::default());

        let plan = orch.plan(&event("cpu-high", "INSUFFICIENT_DATA")).await.unwrap();
        assert_eq!(plan.target, TargetKind::Main);
        assert_eq!(plan.command.target_arn, "mainArn");
        assert_eq!(plan.command.stage_name, "prod");
        assert_eq!(plan.uri, invocation_uri(REGION, "mainArn"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn config_is_reloaded_per_invocation() {
        let (orch, store, _) = setup(MemoryStore::with_body(config()), RecordingApi::default());

        orch.handle(&event("cpu-high", "ALARM")).await.unwrap();
        orch.handle(&event("cpu-high", "OK")).await.unwrap();
        assert_eq!(store.fetches(), 2);
    }
}
