//! Alarm event parsing.
//!
//! Alarm state-change notifications arrive as loosely structured JSON. The
//! parser walks the expected paths and checks that the alarm name and state
//! value are present, are strings, and are non-empty, reporting the dotted
//! path of the first missing field.

use std::fmt;

use crate::error::ParseError;

const ALARM_NAME_PATH: &str = "alarmData.alarmName";
const STATE_VALUE_PATH: &str = "alarmData.state.value";

const ALARM_NAME_POINTER: &str = "/alarmData/alarmName";
const STATE_VALUE_POINTER: &str = "/alarmData/state/value";
const STATE_REASON_POINTER: &str = "/alarmData/state/reason";

/// State carried by an alarm notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmState {
    Ok,
    Alarm,
    InsufficientData,
    /// Any value this switch does not recognize.
    Other(String),
}

impl AlarmState {
    pub fn parse(value: &str) -> Self {
        match value {
            "OK" => AlarmState::Ok,
            "ALARM" => AlarmState::Alarm,
            "INSUFFICIENT_DATA" => AlarmState::InsufficientData,
            other => AlarmState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AlarmState::Ok => "OK",
            AlarmState::Alarm => "ALARM",
            AlarmState::InsufficientData => "INSUFFICIENT_DATA",
            AlarmState::Other(s) => s,
        }
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alarm identity and state extracted from one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmEvent {
    pub alarm_name: String,
    pub state: AlarmState,
    /// Present on CloudWatch notifications; logged only.
    pub alarm_arn: Option<String>,
    pub reason: Option<String>,
}

impl AlarmEvent {
    /// Extract the alarm from an inbound event payload.
    ///
    /// Only a root that is not an object is rejected outright. Below the
    /// root, a level of the wrong type is treated the same as an absent one.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ParseError> {
        if !value.is_object() {
            return Err(ParseError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(value)
            )));
        }

        let alarm_name = non_empty(value.pointer(ALARM_NAME_POINTER))
            .ok_or(ParseError::MissingField(ALARM_NAME_PATH))?;
        let state_value = non_empty(value.pointer(STATE_VALUE_POINTER))
            .ok_or(ParseError::MissingField(STATE_VALUE_PATH))?;

        Ok(Self {
            alarm_name: alarm_name.to_string(),
            state: AlarmState::parse(state_value),
            alarm_arn: non_empty(value.get("alarmArn")).map(str::to_string),
            reason: non_empty(value.pointer(STATE_REASON_POINTER)).map(str::to_string),
        })
    }
}

/// A string value that is present and non-empty. Non-string values count
/// as missing.
fn non_empty(value: Option<&serde_json::Value>) -> Option<&str> {
    value
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
