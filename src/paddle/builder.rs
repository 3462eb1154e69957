// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Assemble PaddleJob resources from an image and a training command.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use kube::api::ObjectMeta;

use crate::constants::{paddle, roles};
use crate::error::{Result, TrainJobError};
use crate::paddle::types::{PaddleJob, PaddleJobSpec, ReplicaSpec, RunPolicy};

/// Builder for a PaddleJob running one command across a master and a set
/// of workers.
///
/// Every replica runs the same pod template. "Master" always has exactly
/// one replica; a worker count of exactly one collapses to the master-only
/// layout, so "Worker" appears only for counts above one.
#[derive(Debug, Clone)]
pub struct PaddleJobBuilder {
    name: String,
    namespace: Option<String>,
    image: String,
    command: Vec<String>,
    args: Vec<String>,
    worker_replicas: Option<u32>,
    run_policy: Option<RunPolicy>,
}

impl PaddleJobBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            image: paddle::BASE_IMAGE.to_string(),
            command: Vec::new(),
            args: Vec::new(),
            worker_replicas: None,
            run_policy: None,
        }
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Image to run the training command in. Defaults to the stock paddle
    /// image.
    pub fn image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }

    pub fn command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Total worker replica count. Required; must be at least one.
    pub fn worker_replicas(mut self, replicas: u32) -> Self {
        self.worker_replicas = Some(replicas);
        self
    }

    pub fn run_policy(mut self, run_policy: RunPolicy) -> Self {
        self.run_policy = Some(run_policy);
        self
    }

    pub fn build(self) -> Result<PaddleJob> {
        if self.name.is_empty() {
            return Err(TrainJobError::InvalidArgument(
                "job name must not be empty".to_string(),
            ));
        }
        let workers = self.worker_replicas.ok_or_else(|| {
            TrainJobError::InvalidArgument(
                "at least one worker replica must be set".to_string(),
            )
        })?;
        if workers == 0 {
            return Err(TrainJobError::InvalidArgument(
                "at least one worker replica must be set".to_string(),
            ));
        }
        if self.image.is_empty() {
            return Err(TrainJobError::InvalidArgument(
                "image must not be empty".to_string(),
            ));
        }
        if self.command.is_empty() {
            return Err(TrainJobError::InvalidArgument(
                "training command must not be empty".to_string(),
            ));
        }

        let template = self.pod_template();

        let mut replica_specs = BTreeMap::new();
        replica_specs.insert(
            roles::MASTER.to_string(),
            ReplicaSpec {
                replicas: Some(1),
                restart_policy: None,
                template: template.clone(),
            },
        );
        // a single worker collapses to the master-only layout
        if workers != 1 {
            replica_specs.insert(
                roles::WORKER.to_string(),
                ReplicaSpec {
                    replicas: Some(workers as i32),
                    restart_policy: None,
                    template,
                },
            );
        }

        Ok(PaddleJob {
            metadata: ObjectMeta {
                name: Some(self.name),
                namespace: self.namespace,
                ..Default::default()
            },
            spec: PaddleJobSpec {
                paddle_replica_specs: replica_specs,
                run_policy: Some(self.run_policy.unwrap_or_default()),
            },
            status: None,
        })
    }

    fn pod_template(&self) -> PodTemplateSpec {
        PodTemplateSpec {
            metadata: None,
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: paddle::CONTAINER_NAME.to_string(),
                    image: Some(self.image.clone()),
                    command: Some(self.command.clone()),
                    args: if self.args.is_empty() {
                        None
                    } else {
                        Some(self.args.clone())
                    },
                    ..Default::default()
                }],
                ..Default::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PaddleJobBuilder {
        PaddleJobBuilder::new("train")
            .namespace("default")
            .image("paddle:test")
            .command(["python", "train.py"])
    }

    #[test]
    fn test_single_worker_collapses_to_master_only() {
        let job = builder().worker_replicas(1).build().unwrap();

        let specs = &job.spec.paddle_replica_specs;
        assert_eq!(specs.len(), 1);
        assert_eq!(specs["Master"].replicas, Some(1));
    }

    #[test]
    fn test_multiple_workers_get_worker_spec() {
        let job = builder().worker_replicas(3).build().unwrap();

        let specs = &job.spec.paddle_replica_specs;
        assert_eq!(specs.len(), 2);
        assert_eq!(specs["Master"].replicas, Some(1));
        assert_eq!(specs["Worker"].replicas, Some(3));
    }

    #[test]
    fn test_worker_replicas_required() {
        let err = builder().build().unwrap_err();
        assert!(matches!(err, TrainJobError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = builder().worker_replicas(0).build().unwrap_err();
        assert!(matches!(err, TrainJobError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = PaddleJobBuilder::new("")
            .image("paddle:test")
            .command(["python"])
            .worker_replicas(1)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrainJobError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_command_rejected() {
        let err = PaddleJobBuilder::new("train")
            .image("paddle:test")
            .worker_replicas(1)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrainJobError::InvalidArgument(_)));
    }

    #[test]
    fn test_container_carries_image_and_command() {
        let job = builder()
            .args(["--epochs", "3"])
            .worker_replicas(2)
            .build()
            .unwrap();

        let template = &job.spec.paddle_replica_specs["Worker"].template;
        let container = &template.spec.as_ref().unwrap().containers[0];
        assert_eq!(container.name, "paddle");
        assert_eq!(container.image.as_deref(), Some("paddle:test"));
        assert_eq!(
            container.command.as_ref().unwrap(),
            &vec!["python".to_string(), "train.py".to_string()]
        );
        assert_eq!(
            container.args.as_ref().unwrap(),
            &vec!["--epochs".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn test_default_image_and_run_policy() {
        let job = PaddleJobBuilder::new("train")
            .command(["python", "train.py"])
            .worker_replicas(1)
            .build()
            .unwrap();

        let container =
            &job.spec.paddle_replica_specs["Master"].template.spec.as_ref().unwrap().containers[0];
        assert_eq!(container.image.as_deref(), Some(paddle::BASE_IMAGE));
        assert!(job.spec.run_policy.is_some());
    }

    #[test]
    fn test_metadata_carries_name_and_namespace() {
        let job = builder().worker_replicas(1).build().unwrap();
        assert_eq!(job.metadata.name.as_deref(), Some("train"));
        assert_eq!(job.metadata.namespace.as_deref(), Some("default"));
    }
}
