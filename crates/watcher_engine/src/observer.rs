use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};

use watcher_core::{Severity, WatchEvent};

/// Receives session events. All callbacks for a session are invoked from
/// that session's thread, in emission order.
pub trait WatchObserver: Send + Sync {
    fn on_log_entry(&self, _text: &str, _severity: Severity) {}
    fn on_change_found(&self, _text: &str, _severity: Severity) {}
    fn on_notification(&self, _text: &str) {}
    fn on_check_count_updated(&self, _count: u64) {}
}

/// Forwards every event into an `mpsc` channel.
pub struct ChannelObserver {
    tx: Mutex<mpsc::Sender<WatchEvent>>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<WatchEvent>) -> Self {
        Self { tx: Mutex::new(tx) }
    }

    /// Creates an observer together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::Receiver<WatchEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: WatchEvent) {
        let tx = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = tx.send(event);
    }
}

impl WatchObserver for ChannelObserver {
    fn on_log_entry(&self, text: &str, severity: Severity) {
        self.send(WatchEvent::LogEntry {
            text: text.to_string(),
            severity,
        });
    }

    fn on_change_found(&self, text: &str, severity: Severity) {
        self.send(WatchEvent::ChangeFound {
            text: text.to_string(),
            severity,
        });
    }

    fn on_notification(&self, text: &str) {
        self.send(WatchEvent::Notification {
            text: text.to_string(),
        });
    }

    fn on_check_count_updated(&self, count: u64) {
        self.send(WatchEvent::CheckCountUpdated { count });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered set of observers. Delivery follows subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn WatchObserver>)>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn WatchObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, observer));
        id
    }

    /// Returns false when the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn publish(&self, event: &WatchEvent) {
        // Snapshot so observers may (un)subscribe from inside a callback.
        let observers: Vec<Arc<dyn WatchObserver>> =
            self.lock().iter().map(|(_, o)| o.clone()).collect();
        for observer in observers {
            match event {
                WatchEvent::LogEntry { text, severity } => observer.on_log_entry(text, *severity),
                WatchEvent::ChangeFound { text, severity } => {
                    observer.on_change_found(text, *severity)
                }
                WatchEvent::Notification { text } => observer.on_notification(text),
                WatchEvent::CheckCountUpdated { count } => observer.on_check_count_updated(*count),
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Arc<dyn WatchObserver>)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
