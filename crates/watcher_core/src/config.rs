use std::time::Duration;

pub const DEFAULT_INTERVAL_SECONDS: u64 = 30;

/// Inputs for one watch session. Never mutated once the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub url: String,
    pub interval_seconds: u64,
    pub selector: String,
    /// Watch the last matching element instead of the first.
    pub select_last: bool,
    pub filter_pattern: Option<String>,
}

impl WatchConfig {
    pub fn new(url: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            selector: selector.into(),
            select_last: true,
            filter_pattern: None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if self.selector.trim().is_empty() {
            return Err(ConfigError::EmptySelector);
        }
        if self.interval_seconds == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("selector must not be empty")]
    EmptySelector,
    #[error("interval must be at least one second")]
    ZeroInterval,
    #[error("invalid filter pattern {pattern:?}: {message}")]
    InvalidFilter { pattern: String, message: String },
}
