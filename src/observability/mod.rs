//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via the `metrics` facade)
//!
//! Consumers:
//!     → Log output (stdout, filtered by RUST_LOG or config)
//!     → Whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Every log line about a filter carries the filter name as a field
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
