//! Stderr log output driven by `HIRE_LOG` or the `-v` count.

use tracing_subscriber::EnvFilter;

pub const HIRE_LOG_ENV: &str = "HIRE_LOG";

/// Upload progress from the Grok adapter stays visible without `-v`.
const QUIET_FILTER: &str = "warn,agent_adapter_grok=info";

#[must_use]
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => QUIET_FILTER,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(verbosity: u8) {
    let filter = std::env::var(HIRE_LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
