use regex::Regex;

use crate::ConfigError;

/// Decides whether changed text is surfaced as a notification.
///
/// Without a pattern every change is notified in full. With a pattern only
/// changes containing a match are notified, and only the first matched
/// portion is carried.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pattern: Option<Regex>,
}

impl NotificationFilter {
    pub fn new(pattern: Option<&str>) -> Result<Self, ConfigError> {
        let pattern = match pattern.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Regex::new(raw).map_err(|err| ConfigError::InvalidFilter {
                pattern: raw.to_string(),
                message: err.to_string(),
            })?),
        };
        Ok(Self { pattern })
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        match &self.pattern {
            None => Some(text.to_string()),
            Some(regex) => regex.find(text).map(|m| m.as_str().to_string()),
        }
    }
}
