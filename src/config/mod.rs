//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → filters handed to FilterManager::load
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs parses new content
//!     → validation.rs validates
//!     → GatewayConfig sent to the reload loop
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Filter options stay untyped here; each plugin binds its own structure

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FilterDescriptor, GatewayConfig, ObservabilityConfig, ReloadConfig};
pub use watcher::ConfigWatcher;
