//! Turning descriptors into ready filters.
//!
//! # Responsibilities
//! - Resolve each descriptor's plugin by name
//! - Create, configure and initialize one instance per descriptor
//! - Keep descriptor order; report failures by position
//!
//! # Design Decisions
//! - A failed descriptor yields an error, never a placeholder entry
//! - No shared state is touched: the registry is only read

use crate::config::FilterDescriptor;
use crate::filter::chain::LoadedFilter;
use crate::filter::error::{FilterError, FilterFailure};
use crate::filter::instance::{Filter, FilterOptions};
use crate::filter::registry::PluginRegistry;
use crate::observability::metrics;

/// Result of building a full descriptor list.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    /// Successfully initialized filters, in descriptor order.
    pub filters: Vec<LoadedFilter>,
    /// Descriptors that failed, in descriptor order.
    pub failures: Vec<FilterFailure>,
}

impl BuildOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds filters against a plugin registry.
#[derive(Debug, Clone, Copy)]
pub struct FilterChainBuilder<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> FilterChainBuilder<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    /// Create a ready filter named `name` configured with `options`.
    pub fn apply(&self, name: &str, options: &FilterOptions) -> Result<Box<dyn Filter>, FilterError> {
        let plugin = self.registry.resolve(name)?;

        let mut filter = plugin
            .create_filter()
            .map_err(|source| FilterError::Instantiation {
                name: name.to_string(),
                source,
            })?;

        filter
            .config()
            .bind(options)
            .map_err(|source| FilterError::ConfigBind {
                name: name.to_string(),
                source,
            })?;

        filter.init().map_err(|source| FilterError::Init {
            name: name.to_string(),
            source,
        })?;

        tracing::debug!(filter = %name, options = options.len(), "Filter initialized");
        Ok(filter)
    }

    /// Apply every descriptor in order, collecting successes and failures.
    pub fn build(&self, descriptors: &[FilterDescriptor]) -> BuildOutcome {
        let mut outcome = BuildOutcome {
            filters: Vec::with_capacity(descriptors.len()),
            failures: Vec::new(),
        };

        for (index, descriptor) in descriptors.iter().enumerate() {
            match self.apply(&descriptor.name, &descriptor.options) {
                Ok(filter) => outcome
                    .filters
                    .push(LoadedFilter::new(descriptor.name.clone(), filter)),
                Err(error) => {
                    tracing::error!(
                        filter = %descriptor.name,
                        index,
                        kind = error.kind(),
                        error = %error,
                        "Filter build failed"
                    );
                    metrics::record_build_failure(error.kind());
                    outcome.failures.push(FilterFailure { index, error });
                }
            }
        }

        outcome
    }
}
