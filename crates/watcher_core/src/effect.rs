use std::time::Duration;

use crate::WatchEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Emit(WatchEvent),
    Fetch { url: String },
    Extract { document: String, selector: String },
    Sleep(Duration),
    Finish(SessionEnd),
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Cancelled,
    TransportFailed,
    SelectorFailed,
    NothingMatched,
}
