//! Logging setup for the riboquery binary.
//!
//! Uses `tracing` with a `tracing-subscriber` formatter on stderr, so the
//! JSON written to stdout stays machine-readable. `RUST_LOG` takes priority
//! over the configured level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable
    Pretty,
    /// Single line per event (default)
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level filter, in `EnvFilter` syntax
    pub level: String,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    pub fn info() -> Self {
        Self::default().with_level("info")
    }

    pub fn debug() -> Self {
        Self::default().with_level("debug")
    }

    pub fn warn() -> Self {
        Self::default()
    }

    /// Level from a `-v` count: 0 = warn, 1 = info, 2 = debug, more = trace.
    pub fn from_verbosity(count: u8) -> Self {
        let level = match count {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self::default().with_level(level)
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    fn filter(&self) -> Result<EnvFilter, String> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| format!("invalid log level '{}': {}", self.level, e))
    }

    /// Install the global subscriber.
    ///
    /// Fails if the level does not parse or a subscriber is already set.
    pub fn try_init(self) -> Result<(), String> {
        let filter = self.filter()?;
        let layer = fmt::layer().with_writer(std::io::stderr);

        let result = match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(layer.pretty())
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(layer.compact())
                .try_init(),
        };
        result.map_err(|e| e.to_string())
    }
}
