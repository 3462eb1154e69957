// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation from inferred or explicit kubeconfig

use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::error::{Result, TrainJobError};

/// How to reach the cluster.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Explicit kubeconfig file. When unset, in-cluster configuration is
    /// tried first, then the default kubeconfig chain.
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to select; defaults to the current context.
    pub context: Option<String>,
}

/// Create a Kubernetes client per the given options.
pub async fn create_client(options: &ConnectOptions) -> Result<Client> {
    match &options.kubeconfig {
        Some(path) => create_client_from_kubeconfig_file(path, options.context.as_deref()).await,
        None if options.context.is_some() => {
            let opts = KubeConfigOptions {
                context: options.context.clone(),
                ..Default::default()
            };
            let config = Config::from_kubeconfig(&opts).await.map_err(|e| {
                TrainJobError::Kubeconfig(format!("Failed to load kubeconfig: {}", e))
            })?;
            Client::try_from(config)
                .map_err(|e| TrainJobError::Kubeconfig(format!("Failed to create client: {}", e)))
        }
        None => {
            let config = Config::infer().await.map_err(|e| {
                TrainJobError::Kubeconfig(format!("Failed to infer config: {}", e))
            })?;
            Client::try_from(config)
                .map_err(|e| TrainJobError::Kubeconfig(format!("Failed to create client: {}", e)))
        }
    }
}

/// Create a Kubernetes client from a kubeconfig file on disk.
async fn create_client_from_kubeconfig_file(path: &Path, context: Option<&str>) -> Result<Client> {
    debug!("Loading kubeconfig from {}", path.display());

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        TrainJobError::Kubeconfig(format!("Failed to read {}: {}", path.display(), e))
    })?;

    create_client_from_kubeconfig(&raw, context).await
}

/// Create a Kubernetes client from a kubeconfig string.
pub async fn create_client_from_kubeconfig(
    kubeconfig: &str,
    context: Option<&str>,
) -> Result<Client> {
    let parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| TrainJobError::Kubeconfig(format!("Failed to parse kubeconfig: {}", e)))?;

    let opts = KubeConfigOptions {
        context: context.map(Into::into),
        ..Default::default()
    };

    let config = Config::from_custom_kubeconfig(parsed, &opts)
        .await
        .map_err(|e| TrainJobError::Kubeconfig(format!("Failed to create config: {}", e)))?;

    Client::try_from(config)
        .map_err(|e| TrainJobError::Kubeconfig(format!("Failed to create client: {}", e)))
}
