//! failswitch-core — alarm-driven route failover for managed HTTP APIs.
//!
//! When a monitoring alarm fires (or clears), FailSwitch looks the alarm up
//! in a routing table stored in object storage, picks the main or fallback
//! backend for the alarm state, patches the API integration to point at it,
//! and republishes the stage.
//!
//! # Architecture
//!
//! ```text
//! raw event (JSON)
//!   │
//!   ▼
//! AlarmEvent::from_value ── ParseError
//!   │
//!   ▼
//! ConfigRepository::load ── RepositoryError      (ObjectStore)
//!   │
//!   ▼
//! resolver::resolve ─────── ResolutionError
//!   │
//!   ▼
//! selector::select          (ALARM → fallback, anything else → main)
//!   │
//!   ▼
//! RouteSwitcher::apply ──── SwitchError          (ManagementApi)
//!   ├── update integration URI
//!   └── create deployment (only after the update succeeded)
//! ```
//!
//! The [`Orchestrator`] sequences these steps and translates every failure
//! into a single [`InvocationError`]. Collaborators that talk to the outside
//! world ([`ObjectStore`], [`ManagementApi`]) are traits so that the AWS
//! implementations live in `failswitch-aws` and tests can use mocks.

pub mod error;
pub mod event;
pub mod orchestrator;
pub mod repository;
pub mod resolver;
pub mod selector;
pub mod store;
pub mod switcher;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{
    BoxError, FailoverError, InvocationError, ParseError, RepositoryError, ResolutionError,
    SwitchError,
};
pub use event::{AlarmEvent, AlarmState};
pub use orchestrator::{Orchestrator, SwitchPlan};
pub use repository::ConfigRepository;
pub use selector::{Target, TargetKind};
pub use store::{FsObjectStore, ObjectStore};
pub use switcher::{Deployment, IntegrationUpdate, ManagementApi, RouteSwitcher, SwitchResult};
pub use types::*;
