//! Tracing and logging (shared setup).

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, ObservabilityConfig, ObservabilityError};

/// Initialize process-wide tracing from the environment.
///
/// Falls back to defaults when the environment is invalid. Safe to call
/// multiple times; subsequent calls become no-ops.
pub fn init() {
    let config = ObservabilityConfig::from_env().unwrap_or_else(|e| {
        eprintln!("shopdesk-observability: {e}; using defaults");
        ObservabilityConfig::default()
    });
    self::tracing::init_with(&config);
}
