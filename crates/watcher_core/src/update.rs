use crate::{normalize, Effect, Msg, Phase, SessionEnd, Severity, WatchEvent, WatchSession};

pub const STARTED_TEXT: &str = "Watch started";
pub const STOPPED_TEXT: &str = "Watch stopped";

/// Pure update function: applies a message to the session and returns the
/// effects the engine must run, in order.
///
/// Messages that do not fit the current phase are ignored.
pub fn update(mut session: WatchSession, msg: Msg) -> (WatchSession, Vec<Effect>) {
    let effects = match (session.phase(), msg) {
        (Phase::Idle, Msg::Start) => {
            session.reset();
            session.set_phase(Phase::Fetching);
            vec![
                Effect::Emit(WatchEvent::CheckCountUpdated { count: 0 }),
                Effect::Emit(WatchEvent::log(STARTED_TEXT, Severity::Info)),
                Effect::Fetch {
                    url: session.config().url.clone(),
                },
            ]
        }
        (Phase::Idle, Msg::CancelRequested) => {
            session.set_phase(Phase::Stopped(SessionEnd::Cancelled));
            vec![Effect::Finish(SessionEnd::Cancelled)]
        }
        (Phase::Fetching, Msg::DocumentFetched(document)) => {
            session.set_phase(Phase::Extracting);
            vec![Effect::Extract {
                document,
                selector: session.config().selector.clone(),
            }]
        }
        (Phase::Fetching, Msg::FetchFailed(message)) => {
            fail(&mut session, SessionEnd::TransportFailed, &message)
        }
        (Phase::Extracting, Msg::ExtractFailed(message)) => {
            fail(&mut session, SessionEnd::SelectorFailed, &message)
        }
        (Phase::Extracting, Msg::Extracted(result)) => {
            match result.select(session.config().select_last) {
                None => {
                    session.set_phase(Phase::Stopped(SessionEnd::NothingMatched));
                    vec![Effect::Finish(SessionEnd::NothingMatched)]
                }
                Some(raw) => {
                    let normalized = normalize(raw);
                    compare(&mut session, normalized)
                }
            }
        }
        (Phase::Sleeping, Msg::SleepElapsed) => {
            session.set_phase(Phase::Fetching);
            vec![Effect::Fetch {
                url: session.config().url.clone(),
            }]
        }
        (Phase::Fetching | Phase::Extracting | Phase::Sleeping, Msg::CancelRequested) => {
            session.set_phase(Phase::Stopped(SessionEnd::Cancelled));
            vec![
                Effect::Emit(WatchEvent::log(STOPPED_TEXT, Severity::Info)),
                Effect::Finish(SessionEnd::Cancelled),
            ]
        }
        _ => Vec::new(),
    };

    (session, effects)
}

fn compare(session: &mut WatchSession, normalized: String) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(4);
    if let Some(changed) = session.observe(normalized) {
        let notification = session.filter().apply(&changed);
        effects.push(Effect::Emit(WatchEvent::ChangeFound {
            text: changed,
            severity: Severity::Notable,
        }));
        if let Some(text) = notification {
            effects.push(Effect::Emit(WatchEvent::Notification { text }));
        }
    }
    let count = session.count_check();
    effects.push(Effect::Emit(WatchEvent::CheckCountUpdated { count }));
    session.set_phase(Phase::Sleeping);
    effects.push(Effect::Sleep(session.config().interval()));
    effects
}

fn fail(session: &mut WatchSession, end: SessionEnd, message: &str) -> Vec<Effect> {
    session.set_phase(Phase::Stopped(end));
    vec![
        Effect::Emit(WatchEvent::log(format!("Error: {message}"), Severity::Error)),
        Effect::Finish(end),
    ]
}
