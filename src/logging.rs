//! Tracing subscriber setup for hosts embedding folio.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set; calling it more
/// than once is harmless.
pub fn init_logging() -> bool {
	init_logging_with(DEFAULT_FILTER)
}

/// Like [`init_logging`] with an explicit fallback filter directive.
pub fn init_logging_with(fallback: &str) -> bool {
	let env_filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(fallback))
		.unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	tracing_subscriber::registry()
		.with(fmt::layer())
		.with(env_filter)
		.try_init()
		.is_ok()
}
