//! `stockwise-observability`
//!
//! **Responsibility:** tracing/logging setup shared by hosts.

/// Initialize process-wide observability (JSON logs, env-filtered).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize compact human-readable logging for interactive/CLI hosts.
pub fn init_compact() {
    tracing::init_compact();
}

/// Tracing configuration (filters, formatters).
pub mod tracing;
