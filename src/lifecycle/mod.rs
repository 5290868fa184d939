//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build initial chain → Start watcher → Spawn reload loop
//!
//! Reload (reload.rs):
//!     GatewayConfig from watcher → FilterManager::load on the blocking pool
//!
//! Shutdown (shutdown.rs):
//!     trigger() → reload loop exits → watcher dropped
//! ```
//!
//! # Design Decisions
//! - An unreadable or invalid config file is fatal at startup
//! - Filters that fail to build never stop the process: a rejected initial
//!   chain starts empty, a rejected reload keeps the previous chain

pub mod reload;
pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{FilterRuntime, StartupError};
