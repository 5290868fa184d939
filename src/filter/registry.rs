//! Filter plugin registry.
//!
//! Maps a filter name to the plugin that creates instances of it. The registry
//! is an ordinary value handed to the manager, so tests can build their own.

use std::sync::Arc;

use dashmap::DashMap;

use crate::filter::error::{BoxError, FilterError, RegistryError};
use crate::filter::instance::Filter;

/// Factory for fresh, unconfigured filter instances.
pub trait FilterPlugin: Send + Sync {
    fn create_filter(&self) -> Result<Box<dyn Filter>, BoxError>;
}

impl<F> FilterPlugin for F
where
    F: Fn() -> Result<Box<dyn Filter>, BoxError> + Send + Sync,
{
    fn create_filter(&self) -> Result<Box<dyn Filter>, BoxError> {
        self()
    }
}

/// Lookup from filter name to plugin.
///
/// Registration goes through `&self` so plugins can register from several
/// threads during startup while the registry is already shared.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: DashMap<String, Arc<dyn FilterPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` under `name`. Names are unique.
    pub fn register(
        &self,
        name: impl Into<String>,
        plugin: impl FilterPlugin + 'static,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        match self.plugins.entry(name) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                Err(RegistryError::Duplicate(entry.key().clone()))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                tracing::debug!(filter = %entry.key(), "Filter plugin registered");
                entry.insert(Arc::new(plugin));
                Ok(())
            }
        }
    }

    /// Look up the plugin registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn FilterPlugin>, FilterError> {
        self.plugins
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FilterError::PluginNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}
