//! Watcher core: pure session state machine, normalization and filtering.
mod config;
mod effect;
mod event;
mod extraction;
mod filter;
mod msg;
mod normalize;
mod state;
mod update;

pub use config::{ConfigError, WatchConfig, DEFAULT_INTERVAL_SECONDS};
pub use effect::{Effect, SessionEnd};
pub use event::{Severity, WatchEvent};
pub use extraction::ExtractionResult;
pub use filter::NotificationFilter;
pub use msg::Msg;
pub use normalize::{normalize, LINE_SEPARATOR};
pub use state::{Phase, WatchSession};
pub use update::{update, STARTED_TEXT, STOPPED_TEXT};
