//! Applying configuration updates to the filter manager.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::config::GatewayConfig;
use crate::filter::FilterManager;

/// Apply every config update to `manager` until shutdown or the update channel closes.
///
/// Loads run on the blocking pool, so a slow filter `init` holds up only the
/// next reload.
pub async fn run_reload_loop(
    manager: Arc<FilterManager>,
    mut updates: mpsc::UnboundedReceiver<GatewayConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    tracing::info!(policy = ?manager.policy(), "Filter reload loop starting");

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => apply_update(&manager, config).await,
                None => {
                    tracing::info!("Config update channel closed, reload loop exiting");
                    break;
                }
            },
            _ = shutdown.recv() => {
                tracing::info!("Reload loop received shutdown signal, exiting loop");
                break;
            }
        }
    }
}

async fn apply_update(manager: &Arc<FilterManager>, config: GatewayConfig) {
    if config.reload.policy != manager.policy() {
        tracing::warn!(
            current = ?manager.policy(),
            requested = ?config.reload.policy,
            "Reload policy changes take effect on restart"
        );
    }

    let target = manager.clone();
    let result = tokio::task::spawn_blocking(move || target.load(&config.filters)).await;

    match result {
        Ok(Ok(report)) => tracing::info!(
            generation = report.generation,
            filters = report.loaded,
            skipped = report.skipped.len(),
            "Config update applied"
        ),
        Ok(Err(e)) => tracing::warn!(error = %e, "Config update not applied"),
        Err(e) => tracing::error!(error = %e, "Filter reload task failed"),
    }
}
