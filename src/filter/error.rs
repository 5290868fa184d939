//! Error types for filter construction and chain reloads.

use thiserror::Error;

/// Boxed error returned by plugin code (factories and `init`).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to turn one descriptor into a ready filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("filter plugin not found: {name}")]
    PluginNotFound { name: String },

    #[error("plugin {name} failed to create a filter: {source}")]
    Instantiation {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid configuration for filter {name}: {source}")]
    ConfigBind {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("filter {name} failed to initialize: {source}")]
    Init {
        name: String,
        #[source]
        source: BoxError,
    },
}

impl FilterError {
    /// Name of the filter the error belongs to.
    pub fn filter_name(&self) -> &str {
        match self {
            FilterError::PluginNotFound { name }
            | FilterError::Instantiation { name, .. }
            | FilterError::ConfigBind { name, .. }
            | FilterError::Init { name, .. } => name,
        }
    }

    /// Short stable label, used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::PluginNotFound { .. } => "plugin_not_found",
            FilterError::Instantiation { .. } => "instantiation",
            FilterError::ConfigBind { .. } => "config_bind",
            FilterError::Init { .. } => "init",
        }
    }
}

/// A descriptor that failed to build, with its position in the input list.
#[derive(Debug, Error)]
#[error("filter #{index}: {error}")]
pub struct FilterFailure {
    pub index: usize,
    #[source]
    pub error: FilterError,
}

/// Errors from registering plugins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("filter plugin name must not be empty")]
    EmptyName,

    #[error("filter plugin already registered: {0}")]
    Duplicate(String),
}

/// A reload that did not publish a new chain.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reload rejected: {} of {total} filters failed to build", .failures.len())]
    Rejected {
        total: usize,
        failures: Vec<FilterFailure>,
    },
}

impl LoadError {
    pub fn failures(&self) -> &[FilterFailure] {
        match self {
            LoadError::Rejected { failures, .. } => failures,
        }
    }
}
