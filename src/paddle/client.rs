// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! PaddleJob facade over the generic resource client.

use std::collections::BTreeSet;
use std::time::Duration;

use kube::api::DynamicObject;
use kube::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::constants::paddle;
use crate::error::{Result, TrainJobError};
use crate::paddle::types::PaddleJob;
use crate::pods::PodSelector;
use crate::resource::{ResourceClient, ResourceScope, WaitParams};

/// Client for PaddleJob resources, bound to the kubeflow.org/v1 identity.
///
/// Thin typed layer over [`ResourceClient`]; drop to [`PaddleJobClient::resource`]
/// for anything not mirrored here.
pub struct PaddleJobClient {
    resource: ResourceClient,
}

impl PaddleJobClient {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    pub fn with_config(client: Client, config: ClientConfig) -> Self {
        let scope =
            ResourceScope::new(paddle::GROUP, paddle::VERSION, paddle::KIND, paddle::PLURAL)
                .with_label_prefix(paddle::LABEL_PREFIX);
        Self {
            resource: ResourceClient::with_config(client, scope, config),
        }
    }

    /// The underlying generic client.
    pub fn resource(&self) -> &ResourceClient {
        &self.resource
    }

    pub async fn create(&self, job: &PaddleJob, namespace: Option<&str>) -> Result<()> {
        self.resource.create(&to_dynamic(job)?, namespace).await
    }

    pub async fn get(&self, name: &str, namespace: Option<&str>) -> Result<PaddleJob> {
        from_dynamic(self.resource.get(name, namespace).await?)
    }

    pub async fn list(&self, namespace: Option<&str>) -> Result<Vec<PaddleJob>> {
        self.resource
            .list(namespace)
            .await?
            .into_iter()
            .map(from_dynamic)
            .collect()
    }

    pub async fn patch(
        &self,
        name: &str,
        patch: &Value,
        namespace: Option<&str>,
    ) -> Result<PaddleJob> {
        from_dynamic(self.resource.patch(name, patch, namespace).await?)
    }

    pub async fn delete(&self, name: &str, namespace: Option<&str>) -> Result<()> {
        self.resource.delete(name, namespace).await
    }

    /// Poll until the job reaches any of the expected conditions.
    pub async fn wait_for_condition(
        &self,
        name: &str,
        namespace: Option<&str>,
        expected: &[&str],
        params: &WaitParams,
    ) -> Result<PaddleJob> {
        from_dynamic(
            self.resource
                .wait_for_condition(name, namespace, expected, params)
                .await?,
        )
    }

    /// Poll until the job finishes, using the configured wait budget.
    pub async fn wait_for_job(&self, name: &str, namespace: Option<&str>) -> Result<PaddleJob> {
        let params = self.resource.wait_params();
        from_dynamic(self.resource.wait_for_terminal(name, namespace, &params).await?)
    }

    /// Poll until the job finishes, with an explicit budget and a per-poll
    /// callback.
    pub async fn wait_for_job_with<F>(
        &self,
        name: &str,
        namespace: Option<&str>,
        params: &WaitParams,
        on_poll: F,
    ) -> Result<PaddleJob>
    where
        F: FnMut(&DynamicObject),
    {
        from_dynamic(
            self.resource
                .wait_for_terminal_with(name, namespace, params, on_poll)
                .await?,
        )
    }

    /// Watch the job, logging every update, until it finishes or `timeout`
    /// elapses.
    pub async fn watch(
        &self,
        name: &str,
        namespace: Option<&str>,
        timeout: Duration,
    ) -> Result<PaddleJob> {
        from_dynamic(
            self.resource
                .watch_until(
                    name,
                    namespace,
                    crate::constants::conditions::TERMINAL,
                    timeout,
                )
                .await?,
        )
    }

    /// Current job status, e.g. "Running", "Succeeded" or "Failed".
    pub async fn status(&self, name: &str, namespace: Option<&str>) -> Result<String> {
        self.resource.status(name, namespace).await
    }

    pub async fn is_running(&self, name: &str, namespace: Option<&str>) -> Result<bool> {
        self.resource.is_running(name, namespace).await
    }

    pub async fn is_succeeded(&self, name: &str, namespace: Option<&str>) -> Result<bool> {
        self.resource.is_succeeded(name, namespace).await
    }

    /// Names of the job's pods matching the selector.
    pub async fn pod_names(
        &self,
        name: &str,
        namespace: Option<&str>,
        selector: &PodSelector,
    ) -> Result<BTreeSet<String>> {
        self.resource.list_pod_names(name, namespace, selector).await
    }

    /// Emit the logs of the job's pods from the paddle container.
    pub async fn logs(
        &self,
        name: &str,
        namespace: Option<&str>,
        selector: &PodSelector,
        follow: bool,
    ) -> Result<()> {
        self.resource
            .get_logs(name, namespace, selector, follow, paddle::CONTAINER_NAME)
            .await
    }
}

fn to_dynamic(job: &PaddleJob) -> Result<DynamicObject> {
    let value = serde_json::to_value(job).map_err(serde_error)?;
    serde_json::from_value(value).map_err(serde_error)
}

fn from_dynamic(obj: DynamicObject) -> Result<PaddleJob> {
    let value = serde_json::to_value(&obj).map_err(serde_error)?;
    serde_json::from_value(value).map_err(serde_error)
}

fn serde_error(e: serde_json::Error) -> TrainJobError {
    TrainJobError::Api {
        operation: "convert",
        source: kube::Error::SerdeError(e),
    }
}
