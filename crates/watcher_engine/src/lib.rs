//! Watcher engine: fetching, extraction and the threaded session runner.
mod decode;
mod extract;
mod fetch;
mod observer;
mod runner;
mod selector;
mod types;
mod watcher;

pub use decode::{decode_document, DecodeError, DecodedDocument};
pub use extract::{Extractor, ScraperExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use observer::{ChannelObserver, ObserverRegistry, SubscriptionId, WatchObserver};
pub use runner::run_session;
pub use selector::{compile_selector, SelectorError};
pub use types::{FailureKind, FetchError, FetchedDocument};
pub use watcher::{SessionHandle, StopSignal, WatchError, Watcher};
