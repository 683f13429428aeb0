//! Pipeline configuration
//!
//! All timing knobs are configurable so the same binary serves fast dev
//! loops and slow production jobs. Defaults match the deployment the
//! pipeline was written for: a weekly batch job that takes well under an
//! hour.

use std::time::Duration;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the remote job to run
    pub job_name: String,

    /// Batch service base URL (e.g., "http://localhost:8080")
    pub service_url: String,

    /// How long to wait before querying the run listing, giving the
    /// eventually-consistent listing time to reflect the new run
    pub grace_delay: Duration,

    /// How long the monitor sleeps between status queries
    pub poll_interval: Duration,

    /// Hard deadline for the run to reach a terminal status
    pub timeout: Duration,

    /// Consecutive failed status queries tolerated before giving up
    pub max_poll_failures: u32,

    /// Retries per step after the first attempt
    pub retries: u32,

    /// Delay between step retry attempts
    pub retry_delay: Duration,
}

impl Config {
    /// Creates a configuration with defaults for everything but the
    /// job name and service URL
    pub fn new(job_name: impl Into<String>, service_url: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            service_url: service_url.into(),
            grace_delay: Duration::from_secs(8),
            poll_interval: Duration::from_secs(60),
            timeout: Duration::from_secs(3600),
            max_poll_failures: 3,
            retries: 2,
            retry_delay: Duration::from_secs(10),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.job_name.is_empty() {
            anyhow::bail!("job_name cannot be empty");
        }

        if self.service_url.is_empty() {
            anyhow::bail!("service_url cannot be empty");
        }

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            anyhow::bail!("service_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.max_poll_failures == 0 {
            anyhow::bail!("max_poll_failures must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_knobs() {
        let config = Config::new("nightly-transfer", "http://localhost:8080");
        assert_eq!(config.grace_delay, Duration::from_secs(8));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.timeout, Duration::from_secs(3600));
        assert_eq!(config.retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new("nightly-transfer", "http://localhost:8080");

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty job name should fail
        config.job_name = String::new();
        assert!(config.validate().is_err());

        config.job_name = "nightly-transfer".to_string();

        // Invalid URL should fail
        config.service_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.service_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());

        // Zero poll interval should fail
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
