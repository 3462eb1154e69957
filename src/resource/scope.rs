// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Identity of the custom-resource kind a client operates on.

use kube::api::{ApiResource, GroupVersionKind};

/// Fixed identity of one namespaced custom-resource kind. A client is
/// constructed for one scope and keeps it for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceScope {
    group: String,
    version: String,
    kind: String,
    plural: String,
    label_prefix: String,
}

impl ResourceScope {
    pub fn new(group: &str, version: &str, kind: &str, plural: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            plural: plural.to_string(),
            label_prefix: kind.to_lowercase(),
        }
    }

    /// Override the prefix of the `<prefix>-job-name` pod label. Defaults
    /// to the lowercased kind, which is rarely what an operator writes.
    pub fn with_label_prefix(mut self, prefix: &str) -> Self {
        self.label_prefix = prefix.to_string();
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn label_prefix(&self) -> &str {
        &self.label_prefix
    }

    /// The `apiVersion` string for resources of this scope.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub(crate) fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(&self.group, &self.version, &self.kind),
            &self.plural,
        )
    }
}
