// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The PaddleJob custom resource and its client facade.

pub mod builder;
pub mod client;
pub mod types;

pub use builder::PaddleJobBuilder;
pub use client::PaddleJobClient;
pub use types::{PaddleJob, PaddleJobSpec, PaddleJobStatus, ReplicaSpec, ReplicaStatus, RunPolicy};
