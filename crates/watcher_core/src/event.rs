use std::fmt;

/// Severity attached to log and change events. `level()` matches the numeric
/// levels front-ends use for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Info,
    Notable,
}

impl Severity {
    pub fn level(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Info => 1,
            Severity::Notable => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
            Severity::Notable => write!(f, "notable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    LogEntry { text: String, severity: Severity },
    ChangeFound { text: String, severity: Severity },
    /// Changed text that passed the notification filter (only the matched portion).
    Notification { text: String },
    CheckCountUpdated { count: u64 },
}

impl WatchEvent {
    pub(crate) fn log(text: impl Into<String>, severity: Severity) -> Self {
        WatchEvent::LogEntry {
            text: text.into(),
            severity,
        }
    }
}
