use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use watcher_core::{
    update, ConfigError, Effect, ExtractionResult, Msg, Phase, SessionEnd, Severity, WatchConfig,
    WatchEvent, WatchSession,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn config() -> WatchConfig {
    WatchConfig {
        url: "http://example.test".to_string(),
        interval_seconds: 1,
        selector: "//p[@id='status']".to_string(),
        select_last: true,
        filter_pattern: None,
    }
}

fn started(config: WatchConfig) -> WatchSession {
    let session = WatchSession::new(config).unwrap();
    let (session, _effects) = update(session, Msg::Start);
    session
}

/// Drives one fetched-and-extracted cycle and returns its effects.
fn cycle(session: WatchSession, matches: &[&str]) -> (WatchSession, Vec<Effect>) {
    let (session, _) = update(session, Msg::DocumentFetched("<html></html>".to_string()));
    let result = ExtractionResult::new(matches.iter().map(|m| m.to_string()).collect());
    let (session, effects) = update(session, Msg::Extracted(result));
    let (session, _) = update(session, Msg::SleepElapsed);
    (session, effects)
}

fn count(count: u64) -> Effect {
    Effect::Emit(WatchEvent::CheckCountUpdated { count })
}

#[test]
fn start_resets_counter_and_fetches() {
    init_logging();
    let session = WatchSession::new(config()).unwrap();
    assert_eq!(session.phase(), Phase::Idle);

    let (session, effects) = update(session, Msg::Start);

    assert!(session.is_running());
    assert_eq!(session.phase(), Phase::Fetching);
    assert_eq!(
        effects,
        vec![
            count(0),
            Effect::Emit(WatchEvent::LogEntry {
                text: "Watch started".to_string(),
                severity: Severity::Info,
            }),
            Effect::Fetch {
                url: "http://example.test".to_string(),
            },
        ]
    );
}

#[test]
fn start_is_ignored_once_running() {
    init_logging();
    let session = started(config());
    let (session, effects) = update(session, Msg::Start);
    assert!(effects.is_empty());
    assert_eq!(session.phase(), Phase::Fetching);
}

#[test]
fn fetched_document_is_handed_to_extractor() {
    init_logging();
    let session = started(config());
    let (session, effects) = update(session, Msg::DocumentFetched("<p>x</p>".to_string()));
    assert_eq!(session.phase(), Phase::Extracting);
    assert_eq!(
        effects,
        vec![Effect::Extract {
            document: "<p>x</p>".to_string(),
            selector: "//p[@id='status']".to_string(),
        }]
    );
}

#[test]
fn first_cycle_sets_baseline_without_change() {
    init_logging();
    let (session, effects) = cycle(started(config()), &["anything at all"]);

    assert_eq!(session.previous_text(), Some("anything at all"));
    assert_eq!(
        effects,
        vec![count(1), Effect::Sleep(Duration::from_secs(1))]
    );
}

#[test]
fn identical_cycles_only_count() {
    init_logging();
    let (session, _) = cycle(started(config()), &["same"]);
    let (session, effects) = cycle(session, &[" same \n"]);

    assert_eq!(session.check_count(), 2);
    assert_eq!(
        effects,
        vec![count(2), Effect::Sleep(Duration::from_secs(1))]
    );
}

#[test]
fn differing_cycle_fires_single_change_with_normalized_text() {
    init_logging();
    let (session, _) = cycle(started(config()), &["before"]);
    let (session, effects) = cycle(session, &["  after\n\n  line  "]);

    assert_eq!(session.previous_text(), Some("after\r\nline"));
    assert_eq!(
        effects,
        vec![
            Effect::Emit(WatchEvent::ChangeFound {
                text: "after\r\nline".to_string(),
                severity: Severity::Notable,
            }),
            Effect::Emit(WatchEvent::Notification {
                text: "after\r\nline".to_string(),
            }),
            count(2),
            Effect::Sleep(Duration::from_secs(1)),
        ]
    );
}

#[test]
fn status_paragraph_scenario() {
    init_logging();
    let session = started(config());

    let (session, effects) = cycle(session, &["  Hello\nWorld  "]);
    assert_eq!(session.previous_text(), Some("Hello\r\nWorld"));
    assert_eq!(effects[0], count(1));

    let (session, effects) = cycle(session, &["  Hello\nWorld  "]);
    assert_eq!(effects[0], count(2));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Emit(WatchEvent::ChangeFound { .. }))));

    let (session, effects) = cycle(session, &["Bye"]);
    assert_eq!(
        effects[0],
        Effect::Emit(WatchEvent::ChangeFound {
            text: "Bye".to_string(),
            severity: Severity::Notable,
        })
    );
    assert!(effects.contains(&count(3)));
    assert_eq!(session.check_count(), 3);
}

#[test]
fn select_first_or_last_match() {
    init_logging();
    let (last, _) = cycle(started(config()), &["one", "two", "three"]);
    assert_eq!(last.previous_text(), Some("three"));

    let first_config = WatchConfig {
        select_last: false,
        ..config()
    };
    let (first, _) = cycle(started(first_config), &["one", "two", "three"]);
    assert_eq!(first.previous_text(), Some("one"));
}

#[test]
fn filter_limits_notification_but_not_change() {
    init_logging();
    let filtered = WatchConfig {
        filter_pattern: Some(r"SALE\d+".to_string()),
        ..config()
    };
    let (session, _) = cycle(started(filtered), &["baseline"]);

    let (session, effects) = cycle(session, &["Big SALE100 today"]);
    assert!(effects.contains(&Effect::Emit(WatchEvent::Notification {
        text: "SALE100".to_string(),
    })));

    let (_session, effects) = cycle(session, &["Nothing here"]);
    assert!(effects.contains(&Effect::Emit(WatchEvent::ChangeFound {
        text: "Nothing here".to_string(),
        severity: Severity::Notable,
    })));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Emit(WatchEvent::Notification { .. }))));
}

#[test]
fn empty_match_stops_silently() {
    init_logging();
    let (session, _) = cycle(started(config()), &["baseline"]);
    let (session, _) = update(session, Msg::DocumentFetched(String::new()));
    let (session, effects) = update(session, Msg::Extracted(ExtractionResult::default()));

    assert!(!session.is_running());
    assert_eq!(session.end(), Some(SessionEnd::NothingMatched));
    assert_eq!(effects, vec![Effect::Finish(SessionEnd::NothingMatched)]);
    assert_eq!(session.previous_text(), Some("baseline"));
}

#[test]
fn fetch_failure_logs_error_and_stops() {
    init_logging();
    let (session, effects) = update(
        started(config()),
        Msg::FetchFailed("connection refused".to_string()),
    );

    assert!(!session.is_running());
    assert_eq!(
        effects,
        vec![
            Effect::Emit(WatchEvent::LogEntry {
                text: "Error: connection refused".to_string(),
                severity: Severity::Error,
            }),
            Effect::Finish(SessionEnd::TransportFailed),
        ]
    );
}

#[test]
fn selector_failure_logs_error_and_stops() {
    init_logging();
    let (session, _) = update(started(config()), Msg::DocumentFetched(String::new()));
    let (session, effects) = update(session, Msg::ExtractFailed("bad selector".to_string()));

    assert_eq!(session.end(), Some(SessionEnd::SelectorFailed));
    assert_eq!(session.previous_text(), None);
    assert_eq!(
        effects,
        vec![
            Effect::Emit(WatchEvent::LogEntry {
                text: "Error: bad selector".to_string(),
                severity: Severity::Error,
            }),
            Effect::Finish(SessionEnd::SelectorFailed),
        ]
    );
}

#[test]
fn cancel_while_sleeping_logs_stop_once() {
    init_logging();
    let (session, _) = update(started(config()), Msg::DocumentFetched(String::new()));
    let (session, _) = update(
        session,
        Msg::Extracted(ExtractionResult::new(vec!["x".to_string()])),
    );
    assert_eq!(session.phase(), Phase::Sleeping);

    let (session, effects) = update(session, Msg::CancelRequested);
    assert_eq!(
        effects,
        vec![
            Effect::Emit(WatchEvent::LogEntry {
                text: "Watch stopped".to_string(),
                severity: Severity::Info,
            }),
            Effect::Finish(SessionEnd::Cancelled),
        ]
    );

    let (session, effects) = update(session, Msg::CancelRequested);
    assert!(effects.is_empty());
    let (session, effects) = update(session, Msg::SleepElapsed);
    assert!(effects.is_empty());
    assert_eq!(session.end(), Some(SessionEnd::Cancelled));
}

#[test]
fn start_then_cancel_never_changes() {
    init_logging();
    let (session, effects) = update(started(config()), Msg::CancelRequested);
    assert!(!session.is_running());
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Emit(WatchEvent::ChangeFound { .. }))));
}

#[test]
fn invalid_configs_are_rejected() {
    init_logging();
    let cases = [
        (
            WatchConfig {
                url: "  ".to_string(),
                ..config()
            },
            ConfigError::EmptyUrl,
        ),
        (
            WatchConfig {
                selector: String::new(),
                ..config()
            },
            ConfigError::EmptySelector,
        ),
        (
            WatchConfig {
                interval_seconds: 0,
                ..config()
            },
            ConfigError::ZeroInterval,
        ),
    ];
    for (config, expected) in cases {
        assert_eq!(WatchSession::new(config).unwrap_err(), expected);
    }

    let bad_filter = WatchConfig {
        filter_pattern: Some("[".to_string()),
        ..config()
    };
    assert!(matches!(
        WatchSession::new(bad_filter),
        Err(ConfigError::InvalidFilter { .. })
    ));
}
