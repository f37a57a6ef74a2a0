//! # Observability & Tracing
//!
//! Conversion is instrumented with the `tracing` crate. The events emitted by the runtime:
//!
//! | Level | Event | Fields |
//! |-------|-------|--------|
//! | `DEBUG` | `Deserializing` | `model`, `source` |
//! | `DEBUG` | `Before hook returned early` | `model`, `source` |
//! | `TRACE` | `Ignoring unknown property` | `model`, `key` |
//! | `WARN` | `Deserialization failed` | `model`, `source`, `error` |
//! | `WARN` | `Unknown property rejected` | `model`, `key` |
//! | `WARN` | `Invalid JSON` | `model`, `error` |
//! | `DEBUG` | `Validation event` | `property`, `severity` |
//!
//! ```bash
//! # Failures only
//! RUST_LOG=warn cargo run
//!
//! # Every deserialization pass
//! RUST_LOG=dataprotection_runtime=debug cargo run
//!
//! # Include ignored keys
//! RUST_LOG=dataprotection_runtime=trace cargo run
//! ```

/// Initializes the global subscriber with `RUST_LOG`-based filtering and a compact format.
///
/// Call once, from a binary. Libraries and tests should not install a subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
