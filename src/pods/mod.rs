// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discovery of and log retrieval for operator-created pods.

mod logs;
pub mod selector;

pub use selector::{job_labels, to_selector, PodSelector};
