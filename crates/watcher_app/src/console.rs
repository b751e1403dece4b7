use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use engine_logging::engine_debug;
use watcher_core::Severity;
use watcher_engine::WatchObserver;

/// Prints session events as timestamped lines.
pub struct ConsoleObserver<W> {
    out: Mutex<W>,
    clock: fn() -> String,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), local_time)
    }
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(out: W, clock: fn() -> String) -> Self {
        Self {
            out: Mutex::new(out),
            clock,
        }
    }

    fn line(&self, tag: &str, text: &str) {
        let stamp = (self.clock)();
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // Multi-line element text stays aligned under its tag.
        let body = text.replace("\r\n", "\n").replace('\n', "\n           ");
        let _ = writeln!(out, "[{stamp}] {tag:<7} {body}");
        let _ = out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> WatchObserver for ConsoleObserver<W> {
    fn on_log_entry(&self, text: &str, severity: Severity) {
        let tag = match severity {
            Severity::Error => "ERROR",
            Severity::Info | Severity::Notable => "INFO",
        };
        self.line(tag, text);
    }

    fn on_change_found(&self, text: &str, _severity: Severity) {
        self.line("CHANGED", text);
    }

    fn on_notification(&self, text: &str) {
        self.line("NOTIFY", text);
    }

    fn on_check_count_updated(&self, count: u64) {
        engine_debug!("checks so far: {}", count);
    }
}

fn local_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
