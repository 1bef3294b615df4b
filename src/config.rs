//! Configuration and CLI argument handling

use clap::Parser;

use crate::presentation::DisplayPrecision;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "stopwatch-service")]
#[command(about = "A background stopwatch service with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial display precision
    #[arg(long, value_enum, default_value_t = DisplayPrecision::Milliseconds)]
    pub precision: DisplayPrecision,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["stopwatch-service"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.precision, DisplayPrecision::Milliseconds);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "stopwatch-service",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--precision",
            "seconds",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.precision, DisplayPrecision::Seconds);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_rejects_unknown_precision() {
        assert!(Config::try_parse_from(["stopwatch-service", "--precision", "minutes"]).is_err());
    }
}
