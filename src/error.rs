// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy shared by all client operations.

use std::time::Duration;

use kube::api::DynamicObject;
use kube::runtime::watcher;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainJobError {
    #[error("{kind} \"{namespace}/{name}\" not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    /// The API server rejected the call (validation, conflict, RBAC) or the
    /// transport failed.
    #[error("Kubernetes API error during {operation}: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: kube::Error,
    },

    /// A single API call exceeded its transport deadline. Distinct from
    /// [`TrainJobError::WaitTimeout`], which is a poll-budget exhaustion.
    #[error("{operation} timed out after {timeout:?}")]
    ApiTimeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// The wait budget ran out before any expected condition appeared.
    /// Carries the last fetched object for diagnostics, when there was one.
    #[error("timed out waiting for \"{namespace}/{name}\" to reach one of {expected:?}")]
    WaitTimeout {
        namespace: String,
        name: String,
        expected: Vec<String>,
        last_seen: Option<Box<DynamicObject>>,
    },

    /// The object exists but its controller has not written any status
    /// conditions yet.
    #[error("\"{namespace}/{name}\" has not reported any status conditions")]
    NoStatusYet { namespace: String, name: String },

    #[error("no pods found for job \"{namespace}/{name}\"")]
    NoPodsFound { namespace: String, name: String },

    #[error("failed to read log stream of pod \"{pod}\": {source}")]
    LogStream {
        pod: String,
        #[source]
        source: std::io::Error,
    },

    #[error("watch stream error: {0}")]
    Watch(#[from] watcher::Error),

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, TrainJobError>;

impl TrainJobError {
    /// Remap a 404 API error to [`TrainJobError::NotFound`] for operations
    /// that target a single named object.
    pub(crate) fn or_not_found(self, kind: &str, namespace: &str, name: &str) -> Self {
        match self {
            TrainJobError::Api {
                source: kube::Error::Api(ref resp),
                ..
            } if resp.code == 404 => TrainJobError::NotFound {
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TrainJobError::NotFound { .. })
    }
}
