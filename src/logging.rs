//! Diagnostic logging setup.
//!
//! Events go to stderr so that stdout carries only the rendered dashboard.
//! The filter is read from `BRANCH_PULSE_LOG` (same syntax as `RUST_LOG`).

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directive
pub const LOG_ENV_VAR: &str = "BRANCH_PULSE_LOG";

/// Configuration for the logging system.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    /// Level used for this crate when no filter is set in the environment
    pub default_level: Level,
    /// Whether ANSI colors are used in log lines
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Raises the default level to `debug` for `--verbose`
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.default_level = Level::DEBUG;
        }
        self
    }
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new(format!("branch_pulse={}", config.default_level))
    })
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(config: LogConfig) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(config.ansi);

    let _ = tracing_subscriber::registry()
        .with(env_filter(&config))
        .with(layer)
        .try_init();
}
