// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Identity of the PaddleJob custom resource served by the training operator
pub mod paddle {
    pub const GROUP: &str = "kubeflow.org";
    pub const VERSION: &str = "v1";
    pub const KIND: &str = "PaddleJob";
    pub const PLURAL: &str = "paddlejobs";
    /// Prefix of the job-name label the operator puts on pods it creates
    pub const LABEL_PREFIX: &str = "paddle";
    /// Container that runs the training code in operator-created pods
    pub const CONTAINER_NAME: &str = "paddle";
    /// Image used by the builder when none is given
    pub const BASE_IMAGE: &str =
        "docker.io/paddlepaddle/paddle:2.4.0rc0-gpu-cuda11.7-cudnn8.4-trt8.4";
}

/// Pod label keys applied by the training operator. Pod discovery selects
/// on these, so they must match what the operator writes.
pub mod labels {
    /// Suffix of the job-name label key; the full key is
    /// `<label_prefix>-job-name`, e.g. `paddle-job-name`
    pub const JOB_NAME_SUFFIX: &str = "job-name";
    pub const JOB_ROLE: &str = "job-role";
    pub const REPLICA_TYPE: &str = "replica-type";
    pub const REPLICA_INDEX: &str = "replica-index";
    /// job-role value carried by master pods
    pub const ROLE_MASTER: &str = "master";
}

/// Condition types reported by training-job controllers. The set is
/// open-ended; unknown types are simply never matched.
pub mod conditions {
    pub const CREATED: &str = "Created";
    pub const RUNNING: &str = "Running";
    pub const RESTARTING: &str = "Restarting";
    pub const SUCCEEDED: &str = "Succeeded";
    pub const FAILED: &str = "Failed";

    /// Conditions after which a job never changes state again
    pub const TERMINAL: &[&str] = &[SUCCEEDED, FAILED];
}

/// Replica role names used as keys of the replica-spec map
pub mod roles {
    pub const MASTER: &str = "Master";
    pub const WORKER: &str = "Worker";
}

/// Default timeouts and polling configuration
pub mod defaults {
    /// Deadline for a single API server call, in seconds
    pub const API_TIMEOUT_SECS: u64 = 120;
    /// Overall budget for condition waits, in seconds
    pub const WAIT_TIMEOUT_SECS: u64 = 600;
    /// Fixed sleep between wait-loop polls, in seconds
    pub const POLL_INTERVAL_SECS: u64 = 30;
}
