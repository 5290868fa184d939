//! Active filter chain ownership and hot reload.
//!
//! # Responsibilities
//! - Hold the chain the request path currently uses
//! - Build replacement chains from descriptor lists
//! - Publish a replacement atomically with respect to readers
//!
//! # Design Decisions
//! - The lock guards only the `Arc` to the chain, never its construction
//! - Readers clone the `Arc` and release immediately
//! - A reload either publishes a complete chain or leaves the old one active

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::config::FilterDescriptor;
use crate::filter::builder::FilterChainBuilder;
use crate::filter::chain::FilterChain;
use crate::filter::error::{FilterError, FilterFailure, LoadError};
use crate::filter::instance::{Filter, FilterOptions};
use crate::filter::registry::PluginRegistry;
use crate::observability::metrics;

/// What a reload does when some descriptors fail to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadPolicy {
    /// Abort the reload and keep serving the previous chain.
    #[default]
    Reject,
    /// Publish the filters that built, leaving out the failed ones.
    Skip,
}

/// Summary of a published reload.
#[derive(Debug)]
pub struct LoadReport {
    /// Generation of the newly active chain.
    pub generation: u64,
    /// Number of filters in the new chain.
    pub loaded: usize,
    /// Descriptors left out under [`ReloadPolicy::Skip`].
    pub skipped: Vec<FilterFailure>,
}

/// Owns the active filter chain.
#[derive(Debug)]
pub struct FilterManager {
    registry: Arc<PluginRegistry>,
    policy: ReloadPolicy,
    active: RwLock<Arc<FilterChain>>,
}

impl FilterManager {
    /// Create a manager with an empty chain and the default (reject) policy.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self::with_policy(registry, ReloadPolicy::default())
    }

    pub fn with_policy(registry: Arc<PluginRegistry>, policy: ReloadPolicy) -> Self {
        Self {
            registry,
            policy,
            active: RwLock::new(Arc::new(FilterChain::empty())),
        }
    }

    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// The chain currently in effect.
    pub fn get_filters(&self) -> Arc<FilterChain> {
        // Writers only swap the Arc, so a poisoned lock still holds a whole chain.
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generation of the chain currently in effect.
    pub fn generation(&self) -> u64 {
        self.get_filters().generation()
    }

    /// Build a single filter without touching the active chain.
    pub fn apply(&self, name: &str, options: &FilterOptions) -> Result<Box<dyn Filter>, FilterError> {
        FilterChainBuilder::new(&self.registry).apply(name, options)
    }

    /// Build a chain from `descriptors` and make it the active one.
    ///
    /// Every failure is logged, so callers may treat reload as fire-and-forget
    /// and ignore the result.
    pub fn load(&self, descriptors: &[FilterDescriptor]) -> Result<LoadReport, LoadError> {
        let total = descriptors.len();
        let outcome = FilterChainBuilder::new(&self.registry).build(descriptors);

        if !outcome.is_complete() && self.policy == ReloadPolicy::Reject {
            let current = self.generation();
            tracing::error!(
                failed = outcome.failures.len(),
                total,
                generation = current,
                "Filter reload rejected. Keeping current chain."
            );
            metrics::record_reload("rejected");
            return Err(LoadError::Rejected {
                total,
                failures: outcome.failures,
            });
        }

        let loaded = outcome.filters.len();
        let generation = {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            let generation = active.generation() + 1;
            *active = Arc::new(FilterChain::new(generation, outcome.filters));
            generation
        };

        if outcome.failures.is_empty() {
            tracing::info!(generation, filters = loaded, "Filter chain reloaded");
            metrics::record_reload("published");
        } else {
            tracing::warn!(
                generation,
                filters = loaded,
                skipped = outcome.failures.len(),
                "Filter chain reloaded without failed filters"
            );
            metrics::record_reload("partial");
        }
        metrics::record_chain_length(loaded);

        Ok(LoadReport {
            generation,
            loaded,
            skipped: outcome.failures,
        })
    }
}
