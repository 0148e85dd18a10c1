//! Routing configuration and switch command types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One routing rule: which API integration an alarm controls and the two
/// backends it can point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    pub alarm_name: String,
    pub api_id: String,
    pub resource_id: String,
    pub http_method: String,
    pub stage_name: String,
    #[serde(rename = "mainLambdaArn")]
    pub main_target_arn: String,
    #[serde(rename = "fallbackLambdaArn")]
    pub fallback_target_arn: String,
}

/// The configuration document as stored: `{ "alarms": [ ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDocument {
    pub alarms: Vec<RoutingRule>,
}

/// Ordered routing rules, loaded fresh for each invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    rules: Vec<RoutingRule>,
}

impl RoutingTable {
    pub fn new(rules: Vec<RoutingRule>) -> Self {
        Self { rules }
    }

    /// Parse a configuration document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let doc: RoutingDocument = serde_json::from_slice(bytes)?;
        Ok(Self::new(doc.alarms))
    }

    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Alarm names that appear more than once, in order of first appearance.
    ///
    /// Only the first rule for such a name is ever used.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut dups = Vec::new();
        for rule in &self.rules {
            let count = seen.entry(rule.alarm_name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                dups.push(rule.alarm_name.as_str());
            }
        }
        dups
    }
}

/// Where the routing configuration lives in object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub bucket: String,
    pub key: String,
}

impl ConfigLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Identifies one method integration of a REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationRef<'a> {
    pub api_id: &'a str,
    pub resource_id: &'a str,
    pub http_method: &'a str,
}

/// Everything needed to repoint one integration and republish its stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCommand {
    pub api_id: String,
    pub resource_id: String,
    pub http_method: String,
    pub stage_name: String,
    pub target_arn: String,
}

impl SwitchCommand {
    /// Build a command from a rule's coordinates and the chosen target.
    pub fn from_rule(rule: &RoutingRule, target_arn: &str) -> Self {
        Self {
            api_id: rule.api_id.clone(),
            resource_id: rule.resource_id.clone(),
            http_method: rule.http_method.clone(),
            stage_name: rule.stage_name.clone(),
            target_arn: target_arn.to_string(),
        }
    }

    pub fn integration(&self) -> IntegrationRef<'_> {
        IntegrationRef {
            api_id: &self.api_id,
            resource_id: &self.resource_id,
            http_method: &self.http_method,
        }
    }
}
