//! Dynamic filter chains for a request-processing gateway.
//!
//! A [`FilterManager`] turns an ordered list of [`FilterDescriptor`]s into a
//! chain of initialized filters taken from a [`PluginRegistry`], and swaps in
//! a new chain on reload without disturbing requests that hold the old one.

pub mod config;
pub mod filter;
pub mod lifecycle;
pub mod observability;

pub use config::{FilterDescriptor, GatewayConfig};
pub use filter::{Filter, FilterChain, FilterConfig, FilterManager, PluginRegistry, ReloadPolicy};
pub use lifecycle::{FilterRuntime, Shutdown};
