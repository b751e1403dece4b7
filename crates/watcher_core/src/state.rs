use crate::{ConfigError, NotificationFilter, SessionEnd, WatchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Extracting,
    Sleeping,
    Stopped(SessionEnd),
}

/// Runtime state of one watch session. A new session is created for every
/// start, so the baseline and counter never leak between runs.
#[derive(Debug, Clone)]
pub struct WatchSession {
    config: WatchConfig,
    filter: NotificationFilter,
    phase: Phase,
    previous_text: Option<String>,
    check_count: u64,
}

impl WatchSession {
    pub fn new(config: WatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let filter = NotificationFilter::new(config.filter_pattern.as_deref())?;
        Ok(Self {
            config,
            filter,
            phase: Phase::Idle,
            previous_text: None,
            check_count: 0,
        })
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.phase,
            Phase::Fetching | Phase::Extracting | Phase::Sleeping
        )
    }

    pub fn end(&self) -> Option<SessionEnd> {
        match self.phase {
            Phase::Stopped(end) => Some(end),
            _ => None,
        }
    }

    pub fn previous_text(&self) -> Option<&str> {
        self.previous_text.as_deref()
    }

    pub fn check_count(&self) -> u64 {
        self.check_count
    }

    pub(crate) fn filter(&self) -> &NotificationFilter {
        &self.filter
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn reset(&mut self) {
        self.previous_text = None;
        self.check_count = 0;
    }

    /// Records a normalized observation. Returns the text when it differs
    /// from an existing baseline; the first observation only sets the baseline.
    pub(crate) fn observe(&mut self, normalized: String) -> Option<String> {
        match &self.previous_text {
            None => {
                self.previous_text = Some(normalized);
                None
            }
            Some(previous) if *previous == normalized => None,
            Some(_) => {
                self.previous_text = Some(normalized.clone());
                Some(normalized)
            }
        }
    }

    pub(crate) fn count_check(&mut self) -> u64 {
        self.check_count += 1;
        self.check_count
    }
}
