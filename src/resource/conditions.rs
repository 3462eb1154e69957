// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status condition inspection.
//!
//! Conditions are written by the controller reconciling the resource,
//! never by this client. A freshly created object has none until the
//! controller's first status write, so "no conditions" is a normal state
//! here, not an error.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::api::DynamicObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of `status.conditions`.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type", default)]
    pub condition_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,
}

/// Conditions of a dynamic object. A missing or null `status.conditions`
/// yields an empty list.
pub fn conditions_of(obj: &DynamicObject) -> Vec<Condition> {
    let Some(value) = obj.data.pointer("/status/conditions") else {
        return Vec::new();
    };
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Type of the most recent condition, if any. Controllers append
/// conditions in chronological order, so the last entry reflects the
/// current state.
pub fn latest_condition_type(obj: &DynamicObject) -> Option<String> {
    conditions_of(obj).pop().map(|c| c.condition_type)
}

/// Whether any condition's type is one of `expected`.
pub fn has_any_condition(obj: &DynamicObject, expected: &[&str]) -> bool {
    conditions_of(obj)
        .iter()
        .any(|c| expected.contains(&c.condition_type.as_str()))
}
