// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client library for Kubeflow-style training-job custom resources.
//!
//! [`resource::ResourceClient`] drives create/get/list/patch/delete,
//! condition waits, watches, pod discovery and log retrieval for any
//! namespaced custom resource; [`paddle::PaddleJobClient`] binds it to the
//! kubeflow.org/v1 PaddleJob kind.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod paddle;
pub mod pods;
pub mod resource;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{create_client, create_client_from_kubeconfig, ConnectOptions};
pub use config::ClientConfig;
pub use error::{Result, TrainJobError};
pub use paddle::{PaddleJob, PaddleJobBuilder, PaddleJobClient};
pub use pods::PodSelector;
pub use resource::{ResourceClient, ResourceScope, WaitParams};
