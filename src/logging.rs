//! Logging and tracing configuration
//!
//! Centralized setup for the `tracing` stack: a console layer (compact or
//! JSON) plus an optional daily-rolling JSON file layer, all behind an
//! `EnvFilter` that defaults to this crate at the configured level.

use std::io;

use tracing::Level;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level applied to this crate when `RUST_LOG` is not set
    pub level: Level,
    /// Emit JSON to the console instead of the compact format
    pub json_format: bool,
    /// Also write JSON logs to a daily-rolling file
    pub log_to_file: bool,
    /// Directory for log files; defaults to `logs`
    pub log_directory: Option<String>,
    /// File name prefix for rolled log files
    pub log_file_prefix: String,
    /// ANSI colors in console output
    pub enable_ansi: bool,
    /// Explicit filter directive overriding the level default
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: "parkgate".to_string(),
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Emit JSON on the console
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging into `directory`
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set the log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set a custom filter directive
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Install the global tracing subscriber
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = if let Some(filter) = &self.env_filter {
            EnvFilter::try_new(filter)?
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "{}={}",
                    env!("CARGO_PKG_NAME").replace('-', "_"),
                    self.level
                ))
            })
        };

        let mut layers: Vec<BoxedLayer> = vec![env_filter.boxed()];

        if self.json_format {
            layers.push(fmt::layer().json().with_writer(io::stderr).boxed());
        } else {
            layers.push(
                fmt::layer().compact().with_writer(io::stderr).with_ansi(self.enable_ansi).boxed(),
            );
        }

        if self.log_to_file {
            let directory = self.log_directory.as_deref().unwrap_or("logs");
            let appender = rolling::daily(directory, &self.log_file_prefix);
            let (writer, guard) = non_blocking(appender);
            layers.push(fmt::layer().json().with_writer(writer).boxed());
            // The guard flushes the writer on drop; keep it for process lifetime.
            std::mem::forget(guard);
        }

        tracing_subscriber::registry().with(layers).init();
        Ok(())
    }

    /// Verbose preset: INFO to the console
    pub fn init_verbose() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::INFO).init()
    }

    /// Debug preset: DEBUG to the console
    pub fn init_debug() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::DEBUG).init()
    }

    /// Production preset: JSON console plus file logging, no colors
    pub fn init_prod(
        log_directory: impl Into<String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new()
            .with_level(Level::INFO)
            .with_json_format()
            .with_file_logging(log_directory)
            .without_ansi()
            .init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json_format);
        assert!(!config.log_to_file);
        assert!(config.enable_ansi);
        assert_eq!(config.log_file_prefix, "parkgate");
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggingConfig::new()
            .with_level(Level::DEBUG)
            .with_json_format()
            .with_file_logging("test_logs")
            .with_file_prefix("gate")
            .without_ansi()
            .with_env_filter("debug");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.json_format);
        assert!(config.log_to_file);
        assert_eq!(config.log_directory.as_deref(), Some("test_logs"));
        assert_eq!(config.log_file_prefix, "gate");
        assert!(!config.enable_ansi);
        assert_eq!(config.env_filter.as_deref(), Some("debug"));
    }
}
