//! Metrics emission.
//!
//! # Metrics
//! - `filter_reloads_total` (counter): reload attempts by `outcome`
//!   (`published`, `partial`, `rejected`)
//! - `filter_build_failures_total` (counter): failed descriptors by `kind`
//! - `filter_chain_length` (gauge): filters in the active chain

/// Record the outcome of one reload.
pub fn record_reload(outcome: &'static str) {
    ::metrics::counter!("filter_reloads_total", "outcome" => outcome).increment(1);
}

/// Record one descriptor that failed to build.
pub fn record_build_failure(kind: &'static str) {
    ::metrics::counter!("filter_build_failures_total", "kind" => kind).increment(1);
}

/// Record the length of the newly published chain.
pub fn record_chain_length(len: usize) {
    ::metrics::gauge!("filter_chain_length").set(len as f64);
}
