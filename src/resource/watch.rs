// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch-based observation of a single resource instance.

use std::time::Duration;

use futures::TryStreamExt;
use kube::api::DynamicObject;
use kube::runtime::{watcher, WatchStreamExt};
use tokio::pin;
use tokio::time::sleep;
use tracing::{info, instrument};

use crate::error::{Result, TrainJobError};
use crate::resource::client::{ensure_name, ResourceClient};
use crate::resource::conditions::{has_any_condition, latest_condition_type};

impl ResourceClient {
    /// Stream updates for the named object, logging each observed state,
    /// until a condition in `expected` appears or `timeout` elapses.
    ///
    /// Unlike the poll-based wait this reacts to every server-side change,
    /// at the cost of holding a watch connection open. Stream errors are
    /// fatal, mirroring the poll loop's treatment of API errors.
    #[instrument(skip(self, expected, timeout), fields(kind = %self.scope().kind()))]
    pub async fn watch_until(
        &self,
        name: &str,
        namespace: Option<&str>,
        expected: &[&str],
        timeout: Duration,
    ) -> Result<DynamicObject> {
        ensure_name(name)?;
        let ns = self.resolve_namespace(namespace).to_string();

        let api = self.api(&ns);
        let config = watcher::Config::default().fields(&format!("metadata.name={name}"));
        let stream = watcher(api, config).applied_objects();
        pin!(stream);

        let deadline = sleep(timeout);
        pin!(deadline);

        let mut last_seen: Option<DynamicObject> = None;
        loop {
            tokio::select! {
                _ = &mut deadline => {
                    return Err(TrainJobError::WaitTimeout {
                        namespace: ns,
                        name: name.to_string(),
                        expected: expected.iter().map(|s| s.to_string()).collect(),
                        last_seen: last_seen.map(Box::new),
                    });
                }
                event = stream.try_next() => {
                    match event? {
                        Some(job) => {
                            let state = latest_condition_type(&job)
                                .unwrap_or_else(|| "<none>".to_string());
                            info!("{}/{} observed in state {}", ns, name, state);

                            if has_any_condition(&job, expected) {
                                return Ok(job);
                            }
                            last_seen = Some(job);
                        }
                        // watch streams restart internally and do not end;
                        // a terminated stream leaves only the diagnostics
                        None => {
                            return Err(TrainJobError::WaitTimeout {
                                namespace: ns,
                                name: name.to_string(),
                                expected: expected.iter().map(|s| s.to_string()).collect(),
                                last_seen: last_seen.map(Box::new),
                            });
                        }
                    }
                }
            }
        }
    }
}
