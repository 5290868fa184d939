//! Configuration file watcher for hot reload.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::GatewayConfig;

/// Watches the configuration file and emits every valid new version.
pub struct ConfigWatcher {
    path: PathBuf,
    poll_interval: Duration,
    loaded_content: Option<String>,
    update_tx: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path, poll_interval: Duration) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                poll_interval,
                loaded_content: None,
                update_tx,
            },
            update_rx,
        )
    }

    /// The text the running configuration was parsed from.
    ///
    /// Changes are detected against this rather than against whatever the
    /// file holds when [`ConfigWatcher::run`] starts, so an edit landing
    /// between the initial load and `run` is still emitted.
    pub fn with_loaded_content(mut self, content: impl Into<String>) -> Self {
        self.loaded_content = Some(content.into());
        self
    }

    /// Start watching. The returned watcher must be kept alive.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors replacing the file by rename are still picked up.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let file_name: Option<OsString> = path.file_name().map(|n| n.to_os_string());
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut last_content = match self.loaded_content {
            Some(content) => Some(content),
            None => fs::read_to_string(&path).ok(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if !touches_config {
                        return;
                    }

                    let content = match fs::read_to_string(&path) {
                        Ok(content) => content,
                        Err(e) => {
                            tracing::warn!(path = ?path, error = %e, "Config file unreadable, skipping reload");
                            return;
                        }
                    };
                    if last_content.as_deref() == Some(content.as_str()) {
                        return;
                    }
                    // Truncate-then-write shows up as an empty file first.
                    if content.trim().is_empty() {
                        tracing::warn!(path = ?path, "Config file is empty, ignoring change");
                        return;
                    }

                    tracing::info!(path = ?path, "Config file change detected, reloading...");
                    match parse_config(&content) {
                        Ok(new_config) => {
                            last_content = Some(content);
                            if tx.send(new_config).is_err() {
                                tracing::debug!("Config update receiver dropped");
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}
