//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterOptions, ReloadPolicy};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Filters in chain order.
    pub filters: Vec<FilterDescriptor>,

    /// Hot reload settings.
    pub reload: ReloadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// One filter to instantiate: the plugin name and its raw options.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FilterDescriptor {
    /// Registered plugin name.
    pub name: String,

    /// Options bound onto the filter's configuration.
    #[serde(default)]
    pub options: FilterOptions,
}

impl FilterDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: FilterOptions::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Hot reload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// How a reload treats descriptors that fail to build.
    pub policy: ReloadPolicy,

    /// Watch the config file and reload on change.
    pub watch: bool,

    /// Poll interval for the file watcher in seconds.
    pub poll_interval_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            policy: ReloadPolicy::Reject,
            watch: true,
            poll_interval_secs: 2,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
