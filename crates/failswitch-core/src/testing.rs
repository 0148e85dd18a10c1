//! In-memory collaborators shared by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::BoxError;
use crate::store::{FetchFuture, ObjectStore};
use crate::switcher::{ApiFuture, Deployment, IntegrationUpdate, ManagementApi};
use crate::types::{ConfigLocation, IntegrationRef};

/// A management-API call as observed by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    UpdateIntegration {
        api_id: String,
        resource_id: String,
        http_method: String,
        uri: String,
    },
    CreateDeployment {
        api_id: String,
        stage_name: String,
    },
}

/// Records every call and optionally fails one of the two operations.
#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    fail_update: Option<&'static str>,
    fail_deployment: Option<&'static str>,
}

impl RecordingApi {
    pub fn failing_update(msg: &'static str) -> Self {
        Self {
            fail_update: Some(msg),
            ..Default::default()
        }
    }

    pub fn failing_deployment(msg: &'static str) -> Self {
        Self {
            fail_deployment: Some(msg),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deployments(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::CreateDeployment { .. }))
            .count()
    }
}

impl ManagementApi for RecordingApi {
    fn update_integration_uri<'a>(
        &'a self,
        integration: IntegrationRef<'a>,
        uri: &'a str,
    ) -> ApiFuture<'a, IntegrationUpdate> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(ApiCall::UpdateIntegration {
                api_id: integration.api_id.to_string(),
                resource_id: integration.resource_id.to_string(),
                http_method: integration.http_method.to_string(),
                uri: uri.to_string(),
            });
            match self.fail_update {
                Some(msg) => Err::<_, BoxError>(msg.into()),
                None => Ok(IntegrationUpdate {
                    uri: Some(uri.to_string()),
                }),
            }
        })
    }

    fn create_deployment<'a>(
        &'a self,
        api_id: &'a str,
        stage_name: &'a str,
    ) -> ApiFuture<'a, Deployment> {
        Box::pin(async move {
            let n = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(ApiCall::CreateDeployment {
                    api_id: api_id.to_string(),
                    stage_name: stage_name.to_string(),
                });
                calls
                    .iter()
                    .filter(|c| matches!(c, ApiCall::CreateDeployment { .. }))
                    .count()
            };
            match self.fail_deployment {
                Some(msg) => Err::<_, BoxError>(msg.into()),
                None => Ok(Deployment {
                    id: Some(format!("dep-{n}")),
                }),
            }
        })
    }
}

/// Serves a fixed body (or nothing) and counts fetches.
#[derive(Debug, Default)]
pub struct MemoryStore {
    body: Option<Vec<u8>>,
    fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: Some(body.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ObjectStore for MemoryStore {
    fn fetch<'a>(&'a self, _location: &'a ConfigLocation) -> FetchFuture<'a> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let body = self.body.clone();
        Box::pin(async move { Ok::<_, BoxError>(body) })
    }
}
