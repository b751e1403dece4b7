use crate::ExtractionResult;

/// Inputs to the session state machine, produced by the engine as it runs effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Controller asked for the session to begin.
    Start,
    /// Fetch finished with the decoded document text.
    DocumentFetched(String),
    /// Fetch failed with a transport error.
    FetchFailed(String),
    /// Selector was applied to the last fetched document.
    Extracted(ExtractionResult),
    /// Document or selector could not be processed.
    ExtractFailed(String),
    /// The inter-cycle wait ran to completion.
    SleepElapsed,
    /// Cancellation was observed while fetching or sleeping.
    CancelRequested,
}
