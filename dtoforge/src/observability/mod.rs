//! Observability (logging)
//!
//! Structured logging through `tracing`. The library only emits events; the
//! binary decides how they are displayed by calling [`init`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-line (development)
    Pretty,
    /// Single-line human-readable
    #[default]
    Compact,
    /// JSON lines, for CI logs
    Json,
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub default_filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn,dtoforge=info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    /// Configuration for a verbosity level (number of `-v` flags)
    #[must_use]
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let default_filter = if quiet {
            "error".to_string()
        } else {
            match verbose {
                0 => "warn,dtoforge=info".to_string(),
                1 => "info,dtoforge=debug".to_string(),
                _ => "debug,dtoforge=trace".to_string(),
            }
        };

        Self {
            default_filter,
            ..Self::default()
        }
    }

    /// Use the given output format
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Initialize the logging stack
///
/// `RUST_LOG` takes precedence over the configured default filter. Logs go to
/// stderr so generated output on stdout stays clean.
///
/// # Example
///
/// ```rust,no_run
/// use dtoforge::observability::{self, ObservabilityConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// observability::init(&ObservabilityConfig::default())?;
/// tracing::info!("Generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}
