use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use engine_logging::{engine_error, engine_info};
use tokio_util::sync::CancellationToken;
use watcher_core::{ConfigError, SessionEnd, WatchConfig, WatchSession};

use crate::{
    Extractor, FetchError, FetchSettings, Fetcher, ObserverRegistry, ReqwestFetcher,
    ScraperExtractor, SubscriptionId, WatchObserver,
};

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("invalid watch configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to build session runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn session thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Starts watch sessions and fans their events out to subscribed observers.
///
/// Each session runs on its own thread; the observers are shared by every
/// session this watcher starts.
pub struct Watcher {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    observers: Arc<ObserverRegistry>,
    next_session: AtomicU64,
}

impl Watcher {
    pub fn new(settings: FetchSettings) -> Result<Self, WatchError> {
        let fetcher = ReqwestFetcher::new(settings)?;
        Ok(Self::with_parts(Arc::new(fetcher), Arc::new(ScraperExtractor)))
    }

    pub fn with_parts(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            fetcher,
            extractor,
            observers: Arc::new(ObserverRegistry::new()),
            next_session: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn WatchObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn start(&self, config: WatchConfig) -> Result<SessionHandle, WatchError> {
        let session = WatchSession::new(config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WatchError::Runtime)?;

        let id = self.next_session.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        let running = Arc::new(AtomicBool::new(true));

        let fetcher = self.fetcher.clone();
        let extractor = self.extractor.clone();
        let observers = self.observers.clone();
        let thread_cancel = cancel.clone();
        let thread_running = running.clone();

        engine_info!(
            "starting session {} url={} selector={:?} interval={}s",
            id,
            session.config().url,
            session.config().selector,
            session.config().interval_seconds
        );
        let thread = thread::Builder::new()
            .name(format!("watch-session-{id}"))
            .spawn(move || {
                engine_logging::set_session_id(Some(id));
                let finished = runtime.block_on(run_session_owned(
                    session,
                    fetcher,
                    extractor,
                    observers,
                    thread_cancel,
                ));
                thread_running.store(false, Ordering::Release);
                finished.end().unwrap_or(SessionEnd::Cancelled)
            })
            .map_err(WatchError::Spawn)?;

        Ok(SessionHandle {
            id,
            cancel,
            running,
            thread: Some(thread),
        })
    }
}

async fn run_session_owned(
    session: WatchSession,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    observers: Arc<ObserverRegistry>,
    cancel: CancellationToken,
) -> WatchSession {
    crate::run_session(
        session,
        fetcher.as_ref(),
        extractor.as_ref(),
        observers.as_ref(),
        &cancel,
    )
    .await
}

/// Cloneable trigger that stops a session from anywhere, e.g. a signal handler.
#[derive(Debug, Clone)]
pub struct StopSignal {
    cancel: CancellationToken,
}

impl StopSignal {
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Controller side of a running session. Dropping the handle stops the session.
#[derive(Debug)]
pub struct SessionHandle {
    id: u64,
    cancel: CancellationToken,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<SessionEnd>>,
}

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Requests cancellation. Safe to call any number of times.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop_signal(&self) -> StopSignal {
        StopSignal {
            cancel: self.cancel.clone(),
        }
    }

    /// Blocks until the session thread exits and reports how it ended.
    pub fn join(mut self) -> SessionEnd {
        match self.thread.take().map(JoinHandle::join) {
            Some(Ok(end)) => end,
            Some(Err(_)) => {
                engine_error!("session {} thread panicked", self.id);
                self.running.store(false, Ordering::Release);
                SessionEnd::Cancelled
            }
            None => SessionEnd::Cancelled,
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
