// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kueue_e2e::config::Config;
use kueue_e2e::kubernetes::create_client_using_cluster;
use kueue_e2e::readiness::{jobset_identity, kueue_identity, wait_for_component_available};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, wait_for_jobset={}, timeout={:?}, interval={:?}",
        config.namespace, config.wait_for_jobset, config.poll.timeout, config.poll.interval
    );

    let (client, _) = create_client_using_cluster(&config.kube_context).await?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling readiness checks");
            on_signal.cancel();
        }
    });

    wait_for_component_available(&client, &kueue_identity(config.namespace), config.poll, &cancel)
        .await?;

    if config.wait_for_jobset {
        wait_for_component_available(&client, &jobset_identity(), config.poll, &cancel).await?;
    }

    info!("Control plane is ready");
    Ok(())
}
