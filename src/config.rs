// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::defaults;

/// Client configuration, loadable from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Namespace used when a call does not name one explicitly. When unset
    /// the namespace of the kube client's current context applies. Looked
    /// up per call, never pinned at client construction.
    pub default_namespace: Option<String>,
    /// Deadline for a single API call, independent of any wait budget
    pub api_timeout: Duration,
    /// Overall budget for condition waits
    pub wait_timeout: Duration,
    /// Fixed sleep between wait-loop polls
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_namespace: None,
            api_timeout: Duration::from_secs(defaults::API_TIMEOUT_SECS),
            wait_timeout: Duration::from_secs(defaults::WAIT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(defaults::POLL_INTERVAL_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.default_namespace = env::var("TRAINJOB_NAMESPACE")
            .ok()
            .filter(|ns| !ns.is_empty());

        if let Some(timeout) = read_secs("TRAINJOB_API_TIMEOUT_SECS")? {
            config.api_timeout = timeout;
        }
        if let Some(timeout) = read_secs("TRAINJOB_WAIT_TIMEOUT_SECS")? {
            config.wait_timeout = timeout;
        }
        if let Some(interval) = read_secs("TRAINJOB_POLL_INTERVAL_SECS")? {
            config.poll_interval = interval;
        }

        Ok(config)
    }
}

fn read_secs(var: &str) -> Result<Option<Duration>> {
    match env::var(var) {
        Ok(value) => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("{var} must be an integer number of seconds"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
