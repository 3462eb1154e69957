// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod discovery and log retrieval for a job's pods.

use std::collections::BTreeSet;

use futures::{AsyncBufReadExt, TryStreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams, LogParams};
use tracing::{info, instrument, warn};

use crate::error::{Result, TrainJobError};
use crate::pods::selector::{job_labels, to_selector, PodSelector};
use crate::resource::client::{ensure_name, ResourceClient};

impl ResourceClient {
    /// Names of the pods the operator created for the named job.
    ///
    /// An empty set means no pods matched the selector and is not an
    /// error; callers that require pods turn it into one.
    pub async fn list_pod_names(
        &self,
        name: &str,
        namespace: Option<&str>,
        selector: &PodSelector,
    ) -> Result<BTreeSet<String>> {
        ensure_name(name)?;
        let ns = self.resolve_namespace(namespace);

        let labels = job_labels(self.scope().label_prefix(), name, selector);
        let params = ListParams::default().labels(&to_selector(&labels));
        let pods: Api<Pod> = Api::namespaced(self.kube_client().clone(), ns);

        let list = self.bounded("list pods", pods.list(&params)).await?;
        let names: BTreeSet<String> = list
            .items
            .into_iter()
            .filter_map(|pod| pod.metadata.name)
            .collect();

        if names.is_empty() {
            warn!(
                "No pods found for job {}/{} with labels {:?}",
                ns, name, labels
            );
        }

        Ok(names)
    }

    /// Fetch the logs of the job's pods from the named container, emitting
    /// them at info level. With `follow` each pod's log is streamed line
    /// by line until the pod stops producing output.
    ///
    /// All selected pods must yield their logs; the first pod that fails
    /// aborts the call.
    #[instrument(skip(self, selector), fields(kind = %self.scope().kind()))]
    pub async fn get_logs(
        &self,
        name: &str,
        namespace: Option<&str>,
        selector: &PodSelector,
        follow: bool,
        container: &str,
    ) -> Result<()> {
        let ns = self.resolve_namespace(namespace).to_string();

        let pod_names = self.list_pod_names(name, Some(&ns), selector).await?;
        if pod_names.is_empty() {
            return Err(TrainJobError::NoPodsFound {
                namespace: ns,
                name: name.to_string(),
            });
        }

        let pods: Api<Pod> = Api::namespaced(self.kube_client().clone(), &ns);
        let params = LogParams {
            container: Some(container.to_string()),
            follow,
            ..Default::default()
        };

        for pod in pod_names {
            if follow {
                self.stream_pod_log(&pods, &pod, &params).await?;
            } else {
                let text = self.bounded("read pod log", pods.logs(&pod, &params)).await?;
                info!("Logs of pod {}:\n{}", pod, text);
            }
        }

        Ok(())
    }

    async fn stream_pod_log(&self, pods: &Api<Pod>, pod: &str, params: &LogParams) -> Result<()> {
        // the deadline covers opening the stream; reading is unbounded,
        // a followed log has no natural end
        let reader = self
            .bounded("open pod log stream", pods.log_stream(pod, params))
            .await?;

        let mut lines = reader.lines();
        while let Some(line) = lines
            .try_next()
            .await
            .map_err(|source| TrainJobError::LogStream {
                pod: pod.to_string(),
                source,
            })?
        {
            info!("[{}] {}", pod, line);
        }

        Ok(())
    }
}
