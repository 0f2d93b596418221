//! Dashboard configuration
//!
//! Defines the tower controller connection settings and the polling cadence.

use std::time::Duration;

/// Default poll interval of the dashboard
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Tower controller base URL (e.g., "http://localhost:8080")
    pub tower_url: String,

    /// How often to fetch jobs and runners
    pub poll_interval: Duration,

    /// How long a single request may take before it counts as failed
    pub request_timeout: Duration,

    /// Poll a single time, print, and exit
    pub once: bool,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(tower_url: String) -> Self {
        Self {
            tower_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            once: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tower_url.is_empty() {
            anyhow::bail!("tower_url cannot be empty");
        }

        if !self.tower_url.starts_with("http://") && !self.tower_url.starts_with("https://") {
            anyhow::bail!("tower_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8080".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_millis(5000));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.once);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.tower_url = String::new();
        assert!(config.validate().is_err());

        config.tower_url = "tower:8080".to_string();
        assert!(config.validate().is_err());

        config.tower_url = "https://tower.internal".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_millis(250);
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
