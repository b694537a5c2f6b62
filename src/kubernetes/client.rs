// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation for e2e suites

use crate::error::{E2eError, Result};
use kube::{config::KubeConfigOptions, Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// Load the client configuration for a kubeconfig context.
///
/// An empty context infers the configuration the same way kubectl does
/// (KUBECONFIG, ~/.kube/config, then in-cluster).
async fn load_config(context: &str) -> Result<KConfig> {
    if context.is_empty() {
        return KConfig::infer()
            .await
            .map_err(|e| E2eError::KubeconfigError(format!("Failed to infer config: {}", e)));
    }

    KConfig::from_kubeconfig(&KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    })
    .await
    .map_err(|e| {
        E2eError::KubeconfigError(format!(
            "Unable to get kubeconfig for context {:?}: {}",
            context, e
        ))
    })
}

/// Create a client for the cluster behind `context`, returning the
/// configuration it was built from alongside it.
#[instrument]
pub async fn create_client_using_cluster(context: &str) -> Result<(Client, KConfig)> {
    let config = load_config(context).await?;
    info!("Using cluster {} for e2e tests", config.cluster_url);

    let client = Client::try_from(config.clone())
        .map_err(|e| E2eError::KubeconfigError(format!("Failed to create client: {}", e)))?;

    Ok((client, config))
}

/// Create a client for the inferred cluster that impersonates `user`.
///
/// `None` or an empty user keeps the kubeconfig identity.
#[instrument]
pub async fn create_impersonating_client(user: Option<&str>) -> Result<Client> {
    let mut config = load_config("").await?;
    apply_impersonation(&mut config, user);

    Client::try_from(config)
        .map_err(|e| E2eError::KubeconfigError(format!("Failed to create client: {}", e)))
}

fn apply_impersonation(config: &mut KConfig, user: Option<&str>) {
    if let Some(user) = user.filter(|u| !u.is_empty()) {
        debug!("Impersonating user {}", user);
        config.auth_info.impersonate = Some(user.to_string());
    }
}
