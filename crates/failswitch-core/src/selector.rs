//! Target selection by alarm state.

use std::fmt;

use crate::event::AlarmState;
use crate::types::RoutingRule;

/// Which of a rule's two backends was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Main,
    Fallback,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Main => f.write_str("main"),
            TargetKind::Fallback => f.write_str("fallback"),
        }
    }
}

/// A backend chosen from a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'r> {
    pub kind: TargetKind,
    pub arn: &'r str,
}

/// Pick the backend for `state`.
///
/// Only `ALARM` selects the fallback. `OK`, `INSUFFICIENT_DATA` and any
/// unrecognized state route to main.
pub fn select<'r>(rule: &'r RoutingRule, state: &AlarmState) -> Target<'r> {
    match state {
        AlarmState::Alarm => Target {
            kind: TargetKind::Fallback,
            arn: &rule.fallback_target_arn,
        },
        AlarmState::Ok | AlarmState::InsufficientData | AlarmState::Other(_) => Target {
            kind: TargetKind::Main,
            arn: &rule.main_target_arn,
        },
    }
}
