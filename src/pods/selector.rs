// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label selectors for the pods the operator created for a job.

use std::collections::BTreeMap;

use crate::constants::labels as label_keys;

/// Which of a job's pods to select.
///
/// `master_only` and `replica_type` are independent constraints and both
/// land in the selector when both are set, even though `job-role=master`
/// combined with `replica-type=worker` can never match a real pod.
#[derive(Debug, Clone, Default)]
pub struct PodSelector {
    /// Restrict to the pod labeled `job-role=master`.
    pub master_only: bool,
    /// Restrict to one replica role, e.g. "Master" or "Worker". Matched
    /// lowercased, the way the operator labels pods.
    pub replica_type: Option<String>,
    /// Restrict to a single replica ordinal.
    pub replica_index: Option<u32>,
}

impl PodSelector {
    /// Selector for every pod of the job.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selector for the master pod only.
    pub fn master() -> Self {
        Self {
            master_only: true,
            ..Default::default()
        }
    }

    /// Selector for the pods of one replica role.
    pub fn replica_type(replica_type: &str) -> Self {
        Self {
            replica_type: Some(replica_type.to_string()),
            ..Default::default()
        }
    }
}

/// Pod labels selecting the pods of the named job.
pub fn job_labels(
    label_prefix: &str,
    name: &str,
    selector: &PodSelector,
) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(
        format!("{}-{}", label_prefix, label_keys::JOB_NAME_SUFFIX),
        name.to_string(),
    );

    if selector.master_only {
        labels.insert(
            label_keys::JOB_ROLE.to_string(),
            label_keys::ROLE_MASTER.to_string(),
        );
    }
    if let Some(replica_type) = &selector.replica_type {
        labels.insert(
            label_keys::REPLICA_TYPE.to_string(),
            replica_type.to_lowercase(),
        );
    }
    if let Some(replica_index) = selector.replica_index {
        labels.insert(
            label_keys::REPLICA_INDEX.to_string(),
            replica_index.to_string(),
        );
    }

    labels
}

/// Render labels as a Kubernetes label-selector string.
pub fn to_selector(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_name_label_always_present() {
        let labels = job_labels("paddle", "train", &PodSelector::all());
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("paddle-job-name").map(String::as_str), Some("train"));
    }

    #[test]
    fn test_master_only() {
        let labels = job_labels("paddle", "train", &PodSelector::master());
        assert_eq!(labels.get("job-role").map(String::as_str), Some("master"));
    }

    #[test]
    fn test_replica_type_is_lowercased() {
        let labels = job_labels("paddle", "train", &PodSelector::replica_type("Worker"));
        assert_eq!(labels.get("replica-type").map(String::as_str), Some("worker"));
    }

    #[test]
    fn test_replica_index() {
        let selector = PodSelector {
            replica_index: Some(2),
            ..Default::default()
        };
        let labels = job_labels("paddle", "train", &selector);
        assert_eq!(labels.get("replica-index").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_master_and_replica_type_are_both_kept() {
        // contradictory on real clusters, but both constraints are
        // preserved rather than one silently winning
        let selector = PodSelector {
            master_only: true,
            replica_type: Some("Worker".to_string()),
            ..Default::default()
        };
        let labels = job_labels("paddle", "train", &selector);
        assert_eq!(labels.get("job-role").map(String::as_str), Some("master"));
        assert_eq!(labels.get("replica-type").map(String::as_str), Some("worker"));
    }

    #[test]
    fn test_to_selector_is_deterministic() {
        let selector = PodSelector {
            master_only: true,
            replica_type: Some("Worker".to_string()),
            replica_index: Some(0),
            ..Default::default()
        };
        let rendered = to_selector(&job_labels("paddle", "train", &selector));
        assert_eq!(
            rendered,
            "job-role=master,paddle-job-name=train,replica-index=0,replica-type=worker"
        );
    }
}
