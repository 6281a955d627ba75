//! Tracing and logging setup shared by services that speak the contracts.

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let raw_format = std::env::var(tracing::LOG_FORMAT_ENV).ok();
    tracing::init_with(&TracingConfig::from_format_var(raw_format.as_deref()));

    if let Some(raw) = raw_format.filter(|raw| LogFormat::parse(raw).is_none()) {
        ::tracing::warn!(value = %raw, "{} not recognised; using json", tracing::LOG_FORMAT_ENV);
    }
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, TracingConfig};
