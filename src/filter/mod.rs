//! Filter chain subsystem.
//!
//! # Data Flow
//! ```text
//! FilterDescriptor[] (name + options)
//!     → manager.rs (load)
//!     → builder.rs (apply, one descriptor at a time)
//!     → registry.rs (resolve name → plugin)
//!     → instance.rs (create → bind options → init)
//!     → chain.rs (ordered, immutable FilterChain)
//!     → manager.rs (swap Arc under write lock)
//!
//! Request path:
//!     manager.rs (get_filters, read lock) → Arc<FilterChain> → iterate in order
//! ```
//!
//! # Design Decisions
//! - Plugins come from an injected registry, not global state
//! - Chains are built outside the lock and published whole
//! - Failed descriptors never appear as placeholder entries

pub mod builder;
pub mod chain;
pub mod error;
pub mod instance;
pub mod manager;
pub mod registry;

pub use builder::{BuildOutcome, FilterChainBuilder};
pub use chain::{FilterChain, LoadedFilter};
pub use error::{BoxError, FilterError, FilterFailure, LoadError, RegistryError};
pub use instance::{Filter, FilterConfig, FilterOptions};
pub use manager::{FilterManager, LoadReport, ReloadPolicy};
pub use registry::{FilterPlugin, PluginRegistry};
