// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic lifecycle operations over one namespaced custom-resource kind.

pub mod client;
pub mod conditions;
pub mod scope;
mod watch;

pub use client::{ResourceClient, WaitParams};
pub use conditions::{conditions_of, has_any_condition, latest_condition_type, Condition};
pub use scope::ResourceScope;
