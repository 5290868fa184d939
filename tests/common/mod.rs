//! Fake filter plugins shared by the integration tests.

use std::sync::Arc;
use std::time::Duration;

use filter_chain::config::FilterDescriptor;
use filter_chain::filter::{BoxError, Filter, FilterConfig, PluginRegistry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TagConfig {
    pub label: String,
    pub priority: u32,
}

/// Accepts any label; rejects an empty one at init.
pub struct TagFilter {
    config: TagConfig,
}

impl Filter for TagFilter {
    fn config(&mut self) -> &mut dyn FilterConfig {
        &mut self.config
    }

    fn init(&mut self) -> Result<(), BoxError> {
        if self.config.label.is_empty() {
            return Err("label must not be empty".into());
        }
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SlowConfig {
    pub delay_ms: u64,
}

/// Sleeps during init to stand in for expensive setup.
pub struct SlowFilter {
    config: SlowConfig,
}

impl Filter for SlowFilter {
    fn config(&mut self) -> &mut dyn FilterConfig {
        &mut self.config
    }

    fn init(&mut self) -> Result<(), BoxError> {
        std::thread::sleep(Duration::from_millis(self.config.delay_ms));
        Ok(())
    }
}

/// Registry with `tag`, `slow` and `offline` (whose factory always fails).
pub fn registry() -> Arc<PluginRegistry> {
    let registry = PluginRegistry::new();
    registry
        .register("tag", || -> Result<Box<dyn Filter>, BoxError> {
            Ok(Box::new(TagFilter {
                config: TagConfig {
                    label: "default".to_string(),
                    priority: 0,
                },
            }))
        })
        .unwrap();
    registry
        .register("slow", || -> Result<Box<dyn Filter>, BoxError> {
            Ok(Box::new(SlowFilter {
                config: SlowConfig::default(),
            }))
        })
        .unwrap();
    registry
        .register("offline", || -> Result<Box<dyn Filter>, BoxError> {
            Err("backing service unavailable".into())
        })
        .unwrap();
    Arc::new(registry)
}

#[allow(dead_code)]
pub fn descriptors(names: &[&str]) -> Vec<FilterDescriptor> {
    names.iter().map(|name| FilterDescriptor::new(*name)).collect()
}
