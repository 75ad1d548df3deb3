//! Subscriber setup for hosts that have none

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact stdout subscriber filtered by `RUST_LOG`, defaulting to
/// `info`.
///
/// # Errors
///
/// Fails if the filter directive is invalid or a global subscriber is
/// already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with("info")
}

/// Like [`init`], with a fallback directive used when `RUST_LOG` is unset,
/// for example `"ezcfg_core=debug"`.
pub fn init_with(default_directive: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;
    let fmt_layer = fmt::layer().with_target(true).with_level(true).compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
