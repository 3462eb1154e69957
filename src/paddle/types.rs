// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::constants::conditions;
use crate::resource::Condition;

/// Desired state of a PaddleJob: one pod template per replica role plus
/// an execution policy.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "kubeflow.org", version = "v1", kind = "PaddleJob")]
#[kube(namespaced, plural = "paddlejobs")]
#[kube(status = "PaddleJobStatus")]
#[serde(rename_all = "camelCase")]
pub struct PaddleJobSpec {
    /// Replica specs keyed by role name ("Master", "Worker")
    pub paddle_replica_specs: BTreeMap<String, ReplicaSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_policy: Option<RunPolicy>,
}

/// Pod template and desired count for one replica role.
#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    pub template: PodTemplateSpec,
}

/// Execution policy applied across all replicas of the job.
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_pod_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_after_finished: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_limit: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaddleJobStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_statuses: Option<BTreeMap<String, ReplicaStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reconcile_time: Option<Time>,
}

/// Observed pod counts for one replica role.
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<i32>,
}

impl PaddleJob {
    /// Latest reported condition type, once the operator has written
    /// status.
    pub fn state(&self) -> Option<&str> {
        self.status
            .as_ref()?
            .conditions
            .as_ref()?
            .last()
            .map(|c| c.condition_type.as_str())
    }

    /// Whether the job reached a terminal condition.
    pub fn is_finished(&self) -> bool {
        self.state()
            .is_some_and(|state| conditions::TERMINAL.contains(&state))
    }

    pub fn is_succeeded(&self) -> bool {
        self.state() == Some(conditions::SUCCEEDED)
    }
}
