// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic lifecycle client for one namespaced custom-resource kind.

use std::future::Future;
use std::time::Duration;

use kube::api::{
    Api, ApiResource, DeleteParams, DynamicObject, ListParams, Patch, PatchParams, PostParams,
};
use kube::Client;
use serde_json::Value;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::constants::conditions;
use crate::error::{Result, TrainJobError};
use crate::resource::conditions::{has_any_condition, latest_condition_type};
use crate::resource::scope::ResourceScope;

/// Budget for a condition wait: total timeout and fixed poll spacing.
#[derive(Debug, Clone, Copy)]
pub struct WaitParams {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitParams {
    fn default() -> Self {
        let config = ClientConfig::default();
        Self {
            timeout: config.wait_timeout,
            poll_interval: config.poll_interval,
        }
    }
}

/// Client for all lifecycle operations on one custom-resource kind,
/// plus discovery of and log retrieval for the pods belonging to an
/// instance.
///
/// Holds only fixed state: the transport handle, the resource identity
/// and timeouts. Nothing is cached between calls; every read is a fresh
/// fetch.
pub struct ResourceClient {
    client: Client,
    scope: ResourceScope,
    resource: ApiResource,
    config: ClientConfig,
}

impl ResourceClient {
    pub fn new(client: Client, scope: ResourceScope) -> Self {
        Self::with_config(client, scope, ClientConfig::default())
    }

    pub fn with_config(client: Client, scope: ResourceScope, config: ClientConfig) -> Self {
        let resource = scope.api_resource();
        Self {
            client,
            scope,
            resource,
            config,
        }
    }

    pub fn scope(&self) -> &ResourceScope {
        &self.scope
    }

    /// The configured wait budget, usable wherever a [`WaitParams`] is
    /// expected.
    pub fn wait_params(&self) -> WaitParams {
        WaitParams {
            timeout: self.config.wait_timeout,
            poll_interval: self.config.poll_interval,
        }
    }

    pub(crate) fn kube_client(&self) -> &Client {
        &self.client
    }

    /// Resolve the namespace for one call: explicit argument, then the
    /// configured default, then the current context's namespace. Looked up
    /// here rather than at construction so a client never carries a stale
    /// default.
    pub(crate) fn resolve_namespace<'a>(&'a self, namespace: Option<&'a str>) -> &'a str {
        namespace
            .or(self.config.default_namespace.as_deref())
            .unwrap_or_else(|| self.client.default_namespace())
    }

    pub(crate) fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.resource)
    }

    /// Run one API call under the per-call transport deadline.
    pub(crate) async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = kube::Result<T>>,
    ) -> Result<T> {
        match timeout(self.config.api_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(TrainJobError::Api { operation, source }),
            Err(_) => Err(TrainJobError::ApiTimeout {
                operation,
                timeout: self.config.api_timeout,
            }),
        }
    }

    /// Submit a new resource instance. The object must carry
    /// `metadata.name`; everything else is validated by the API server.
    #[instrument(skip(self, resource), fields(kind = %self.scope.kind()))]
    pub async fn create(&self, resource: &DynamicObject, namespace: Option<&str>) -> Result<()> {
        let name = resource
            .metadata
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                TrainJobError::InvalidArgument("resource must carry metadata.name".to_string())
            })?;
        let ns = self.resolve_namespace(namespace).to_string();

        let api = self.api(&ns);
        self.bounded("create", api.create(&PostParams::default(), resource))
            .await?;

        info!("{} {}/{} has been created", self.scope.kind(), ns, name);
        Ok(())
    }

    /// Fetch one instance by name.
    pub async fn get(&self, name: &str, namespace: Option<&str>) -> Result<DynamicObject> {
        ensure_name(name)?;
        let ns = self.resolve_namespace(namespace);

        let api = self.api(ns);
        self.bounded("get", api.get(name))
            .await
            .map_err(|e| e.or_not_found(self.scope.kind(), ns, name))
    }

    /// Fetch all instances in the namespace. No instances is an empty
    /// list, not an error.
    pub async fn list(&self, namespace: Option<&str>) -> Result<Vec<DynamicObject>> {
        let ns = self.resolve_namespace(namespace);

        let api = self.api(ns);
        let list = self
            .bounded("list", api.list(&ListParams::default()))
            .await?;
        Ok(list.items)
    }

    /// Apply a merge patch and return the server's resulting object.
    pub async fn patch(
        &self,
        name: &str,
        patch: &Value,
        namespace: Option<&str>,
    ) -> Result<DynamicObject> {
        ensure_name(name)?;
        let ns = self.resolve_namespace(namespace);

        let api = self.api(ns);
        self.bounded(
            "patch",
            api.patch(name, &PatchParams::default(), &Patch::Merge(patch)),
        )
        .await
        .map_err(|e| e.or_not_found(self.scope.kind(), ns, name))
    }

    /// Request deletion. A repeated delete surfaces [`TrainJobError::NotFound`];
    /// callers that want idempotency check [`TrainJobError::is_not_found`].
    #[instrument(skip(self), fields(kind = %self.scope.kind()))]
    pub async fn delete(&self, name: &str, namespace: Option<&str>) -> Result<()> {
        ensure_name(name)?;
        let ns = self.resolve_namespace(namespace).to_string();

        let api = self.api(&ns);
        self.bounded("delete", api.delete(name, &DeleteParams::default()))
            .await
            .map_err(|e| e.or_not_found(self.scope.kind(), &ns, name))?;

        info!("{} {}/{} has been deleted", self.scope.kind(), ns, name);
        Ok(())
    }

    /// Poll until any condition in `expected` appears on the object.
    ///
    /// Polls are spaced exactly `poll_interval` apart, with a total budget
    /// of floor(timeout / poll_interval) attempts, at least one. No
    /// backoff, no jitter. A missing or empty `status.conditions` counts
    /// as "not yet"; an API error on any poll aborts the wait immediately
    /// instead of consuming an attempt.
    pub async fn wait_for_condition(
        &self,
        name: &str,
        namespace: Option<&str>,
        expected: &[&str],
        params: &WaitParams,
    ) -> Result<DynamicObject> {
        self.wait_for_condition_with(name, namespace, expected, params, |_| {})
            .await
    }

    /// Same as [`ResourceClient::wait_for_condition`], invoking `on_poll`
    /// with every fetched object. The callback is side-effect only; its
    /// behavior never influences the wait.
    #[instrument(skip(self, params, on_poll), fields(kind = %self.scope.kind()))]
    pub async fn wait_for_condition_with<F>(
        &self,
        name: &str,
        namespace: Option<&str>,
        expected: &[&str],
        params: &WaitParams,
        mut on_poll: F,
    ) -> Result<DynamicObject>
    where
        F: FnMut(&DynamicObject),
    {
        ensure_name(name)?;
        if params.poll_interval.is_zero() {
            return Err(TrainJobError::InvalidArgument(
                "poll interval must be non-zero".to_string(),
            ));
        }

        let attempts = attempt_budget(params);
        let ns = self.resolve_namespace(namespace).to_string();
        let mut last_seen: Option<DynamicObject> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                sleep(params.poll_interval).await;
            }

            let job = self.get(name, Some(&ns)).await?;
            on_poll(&job);

            if has_any_condition(&job, expected) {
                return Ok(job);
            }

            debug!(
                "{}/{} not yet in {:?} (attempt {}/{})",
                ns,
                name,
                expected,
                attempt + 1,
                attempts
            );
            last_seen = Some(job);
        }

        Err(TrainJobError::WaitTimeout {
            namespace: ns,
            name: name.to_string(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            last_seen: last_seen.map(Box::new),
        })
    }

    /// Wait until the job reaches either terminal condition, "Succeeded"
    /// or "Failed".
    pub async fn wait_for_terminal(
        &self,
        name: &str,
        namespace: Option<&str>,
        params: &WaitParams,
    ) -> Result<DynamicObject> {
        self.wait_for_condition(name, namespace, conditions::TERMINAL, params)
            .await
    }

    /// Terminal wait with a per-poll callback.
    pub async fn wait_for_terminal_with<F>(
        &self,
        name: &str,
        namespace: Option<&str>,
        params: &WaitParams,
        on_poll: F,
    ) -> Result<DynamicObject>
    where
        F: FnMut(&DynamicObject),
    {
        self.wait_for_condition_with(name, namespace, conditions::TERMINAL, params, on_poll)
            .await
    }

    /// Type of the job's most recent status condition, e.g. "Running".
    /// A job whose controller has not written conditions yet is
    /// [`TrainJobError::NoStatusYet`], never a default string.
    pub async fn status(&self, name: &str, namespace: Option<&str>) -> Result<String> {
        let ns = self.resolve_namespace(namespace).to_string();
        let job = self.get(name, Some(&ns)).await?;

        latest_condition_type(&job).ok_or_else(|| TrainJobError::NoStatusYet {
            namespace: ns,
            name: name.to_string(),
        })
    }

    /// Whether the most recent condition is "Running". Status errors
    /// propagate; absence of status is not `false`.
    pub async fn is_running(&self, name: &str, namespace: Option<&str>) -> Result<bool> {
        Ok(self.status(name, namespace).await? == conditions::RUNNING)
    }

    /// Whether the most recent condition is "Succeeded". Status errors
    /// propagate; absence of status is not `false`.
    pub async fn is_succeeded(&self, name: &str, namespace: Option<&str>) -> Result<bool> {
        Ok(self.status(name, namespace).await? == conditions::SUCCEEDED)
    }
}

pub(crate) fn ensure_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TrainJobError::InvalidArgument(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn attempt_budget(params: &WaitParams) -> u64 {
    let attempts = (params.timeout.as_millis() / params.poll_interval.as_millis()) as u64;
    attempts.max(1)
}
