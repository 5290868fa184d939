//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build and publish the initial filter chain
//! - Start the file watcher and the reload loop when enabled
//!
//! # Design Decisions
//! - An unreadable or invalid config file is fatal
//! - A chain that fails to build is not: the runtime starts with the empty
//!   chain and keeps watching, so a corrected file brings filters up
//! - The watcher compares against the text that was actually loaded

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::RecommendedWatcher;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::{parse_config, ConfigError, ConfigWatcher};
use crate::filter::{FilterManager, PluginRegistry};
use crate::lifecycle::reload::run_reload_loop;
use crate::lifecycle::shutdown::Shutdown;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to watch configuration: {0}")]
    Watch(#[from] notify::Error),
}

/// A running filter manager fed by a configuration file.
pub struct FilterRuntime {
    manager: Arc<FilterManager>,
    shutdown: Shutdown,
    reload_task: Option<JoinHandle<()>>,
    watcher: Option<RecommendedWatcher>,
}

impl FilterRuntime {
    /// Load `path`, publish its chain, and start hot reload if the config enables it.
    ///
    /// If the initial chain is rejected the error is logged and the runtime
    /// starts serving the empty chain (generation 0).
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn start(path: &Path, registry: Arc<PluginRegistry>) -> Result<Self, StartupError> {
        let content = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = parse_config(&content)?;

        tracing::info!(
            path = ?path,
            filters = config.filters.len(),
            policy = ?config.reload.policy,
            watch = config.reload.watch,
            "Configuration loaded"
        );

        let manager = Arc::new(FilterManager::with_policy(registry, config.reload.policy));
        match manager.load(&config.filters) {
            Ok(report) if !report.skipped.is_empty() => {
                tracing::warn!(skipped = report.skipped.len(), "Initial chain started without some filters");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Initial filter chain rejected, starting with an empty chain");
            }
        }

        let shutdown = Shutdown::new();
        let (reload_task, watcher) = if config.reload.watch {
            let (watcher, updates) =
                ConfigWatcher::new(path, Duration::from_secs(config.reload.poll_interval_secs));
            let watcher = watcher.with_loaded_content(content).run()?;
            let task = tokio::spawn(run_reload_loop(manager.clone(), updates, shutdown.subscribe()));
            (Some(task), Some(watcher))
        } else {
            (None, None)
        };

        Ok(Self {
            manager,
            shutdown,
            reload_task,
            watcher,
        })
    }

    pub fn manager(&self) -> &Arc<FilterManager> {
        &self.manager
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Stop watching and wait for the reload loop to exit.
    pub async fn shutdown(mut self) {
        drop(self.watcher.take());
        self.shutdown.trigger();
        if let Some(task) = self.reload_task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Reload loop ended abnormally");
            }
        }
        tracing::info!("Filter runtime stopped");
    }
}
