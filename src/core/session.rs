//! Connection lifecycle as a pure state machine
//!
//! Transports translate their callbacks into [`WsEvent`]s; [`transition`]
//! maps `(state, event)` to the next state plus the log and status effects
//! the front end must apply.

use super::log::log_line;
use crate::ws_state::{Status, WsState};

/// Close code reported when the transport dropped without a close frame
pub const CLOSE_ABNORMAL: u16 = 1006;
/// Close code reported when a close frame carried no status
pub const CLOSE_NO_STATUS: u16 = 1005;

/// Lifecycle event raised by a transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WsEvent {
    Open,
    Text(String),
    /// Binary frame; only its length is ever kept
    Binary(usize),
    Close {
        code: u16,
        reason: Option<String>,
    },
    /// Transport error with its already rendered descriptor
    Error(String),
}

/// Side effect produced by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Log(String),
    SetStatus(Status),
}

/// Advance the connection targeting `url` from `state` on `event`
pub fn transition(state: WsState, url: &str, event: WsEvent) -> (WsState, Vec<Effect>) {
    match event {
        WsEvent::Open => (
            WsState::Open,
            vec![
                Effect::SetStatus(Status::Connected),
                Effect::Log(log_line!("OPEN", url)),
            ],
        ),
        WsEvent::Text(text) => (state, vec![Effect::Log(log_line!("RECV", text))]),
        WsEvent::Binary(len) => (
            state,
            vec![Effect::Log(log_line!("RECV", format!("[binary] {len}B")))],
        ),
        WsEvent::Close { code, reason } => (
            WsState::Closed,
            vec![
                Effect::SetStatus(Status::Disconnected),
                Effect::Log(log_line!("CLOSE", code, reason.unwrap_or_default())),
            ],
        ),
        WsEvent::Error(descriptor) => (
            WsState::Error,
            vec![
                Effect::Log(log_line!("ERROR", descriptor)),
                Effect::SetStatus(Status::Error),
            ],
        ),
    }
}

/// Render a transport error: the message when there is one, else `[<raw>]`
pub fn describe_error(message: Option<&str>, raw: &str) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => message.to_string(),
        None => format!("[{raw}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "ws://127.0.0.1:8765/chat";

    fn logs(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Log(line) => Some(line.as_str()),
                Effect::SetStatus(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_open_sets_connected() {
        let (state, effects) = transition(WsState::Connecting, URL, WsEvent::Open);
        assert_eq!(state, WsState::Open);
        assert_eq!(
            effects,
            vec![
                Effect::SetStatus(Status::Connected),
                Effect::Log(format!("OPEN {URL}")),
            ]
        );
    }

    #[test]
    fn test_text_logged_verbatim() {
        let (state, effects) =
            transition(WsState::Open, URL, WsEvent::Text("srv: hello  there".into()));
        assert_eq!(state, WsState::Open);
        assert_eq!(logs(&effects), vec!["RECV srv: hello  there"]);
    }

    #[test]
    fn test_binary_logs_length_only() {
        let (_, effects) = transition(WsState::Open, URL, WsEvent::Binary(130));
        assert_eq!(logs(&effects), vec!["RECV [binary] 130B"]);
        assert!(!effects.iter().any(|e| matches!(e, Effect::SetStatus(_))));
    }

    #[test]
    fn test_close_without_reason_renders_empty() {
        let (state, effects) = transition(
            WsState::Open,
            URL,
            WsEvent::Close {
                code: 1000,
                reason: None,
            },
        );
        assert_eq!(state, WsState::Closed);
        assert_eq!(logs(&effects), vec!["CLOSE 1000 "]);
        assert!(effects.contains(&Effect::SetStatus(Status::Disconnected)));
    }

    #[test]
    fn test_close_with_reason() {
        let (_, effects) = transition(
            WsState::Open,
            URL,
            WsEvent::Close {
                code: 4000,
                reason: Some("bye".into()),
            },
        );
        assert_eq!(logs(&effects), vec!["CLOSE 4000 bye"]);
    }

    #[test]
    fn test_error_sets_error_status() {
        let (state, effects) = transition(WsState::Open, URL, WsEvent::Error("reset".into()));
        assert_eq!(state, WsState::Error);
        assert_eq!(
            effects,
            vec![
                Effect::Log("ERROR reset".into()),
                Effect::SetStatus(Status::Error),
            ]
        );
    }

    #[test]
    fn test_describe_error_falls_back_to_raw() {
        assert_eq!(describe_error(Some("boom"), "error"), "boom");
        assert_eq!(describe_error(Some("  "), "error"), "[error]");
        assert_eq!(describe_error(None, "error"), "[error]");
    }
}
