use std::collections::VecDeque;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;
use watcher_core::{update, Effect, Msg, SessionEnd, WatchSession};

use crate::{Extractor, Fetcher, ObserverRegistry};

/// Drives a session until it stops and returns its final state.
///
/// Fetching and sleeping both race `cancel`; a stop observed at either point
/// ends the session before another fetch is issued. Events are published
/// from the task running this future.
pub async fn run_session(
    session: WatchSession,
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    observers: &ObserverRegistry,
    cancel: &CancellationToken,
) -> WatchSession {
    let mut session = session;
    let mut inbox = VecDeque::from([Msg::Start]);

    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(session, msg);
        session = next;
        for effect in effects {
            match effect {
                Effect::Emit(event) => observers.publish(&event),
                Effect::Fetch { url } => inbox.push_back(fetch(fetcher, &url, cancel).await),
                Effect::Extract { document, selector } => {
                    inbox.push_back(extract(extractor, &document, &selector))
                }
                Effect::Sleep(interval) => inbox.push_back(sleep(interval, cancel).await),
                Effect::Finish(end) => log_finish(end, session.check_count()),
            }
        }
    }

    session
}

async fn fetch(fetcher: &dyn Fetcher, url: &str, cancel: &CancellationToken) -> Msg {
    engine_debug!("fetching {}", url);
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Msg::CancelRequested,
        result = fetcher.fetch(url) => result,
    };
    match result {
        Ok(document) => Msg::DocumentFetched(document.text),
        Err(err) => {
            engine_warn!("fetch of {} failed: {}", url, err);
            Msg::FetchFailed(err.to_string())
        }
    }
}

fn extract(extractor: &dyn Extractor, document: &str, selector: &str) -> Msg {
    match extractor.extract(document, selector) {
        Ok(result) => {
            engine_debug!("selector {:?} matched {} element(s)", selector, result.matches.len());
            Msg::Extracted(result)
        }
        Err(err) => {
            engine_warn!("extraction failed: {}", err);
            Msg::ExtractFailed(err.to_string())
        }
    }
}

async fn sleep(interval: Duration, cancel: &CancellationToken) -> Msg {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Msg::CancelRequested,
        _ = tokio::time::sleep(interval) => Msg::SleepElapsed,
    }
}

fn log_finish(end: SessionEnd, checks: u64) {
    match end {
        SessionEnd::Cancelled => engine_info!("watch stopped after {} check(s)", checks),
        SessionEnd::NothingMatched => {
            engine_info!("selector matched nothing; watch ended after {} check(s)", checks)
        }
        SessionEnd::TransportFailed | SessionEnd::SelectorFailed => {
            engine_warn!("watch ended ({:?}) after {} check(s)", end, checks)
        }
    }
}
