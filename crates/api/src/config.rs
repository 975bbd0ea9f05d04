//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `SUBMISSION_TIMEOUT_SECS`: time allowed for the backend to accept an
///   application (default: `30`)
/// - `SUBMISSION_LATENCY_MS`: artificial delay of the stub backend (default: `0`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub submission_timeout: Duration,
    pub submission_latency: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            submission_timeout: lookup("SUBMISSION_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.submission_timeout),
            submission_latency: lookup("SUBMISSION_LATENCY_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.submission_latency),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            submission_timeout: Duration::from_secs(30),
            submission_latency: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.submission_timeout, Duration::from_secs(30));
        assert_eq!(config.submission_latency, Duration::ZERO);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_lookup_overrides_and_bad_values() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            "SUBMISSION_TIMEOUT_SECS" => Some("5".to_string()),
            "SUBMISSION_LATENCY_MS" => Some("250".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 3000);
        assert_eq!(config.submission_timeout, Duration::from_secs(5));
        assert_eq!(config.submission_latency, Duration::from_millis(250));
    }
}
