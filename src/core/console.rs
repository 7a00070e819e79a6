//! Log pane and status indicator state shared by both front ends

use super::commands::ApiOutcome;
use super::log::LogSink;
use super::session::Effect;
use crate::ws_state::Status;
use tracing::info;

/// What the user sees: the log buffer and the status label
#[derive(Debug, Default)]
pub struct Console {
    log: LogSink,
    status: Status,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply effects in order, returning the lines that were appended
    pub fn apply(&mut self, effects: impl IntoIterator<Item = Effect>) -> Vec<String> {
        let mut appended = Vec::new();
        for effect in effects {
            match effect {
                Effect::Log(line) => {
                    self.log.append_line(&line);
                    appended.push(line);
                }
                Effect::SetStatus(status) => {
                    if status != self.status {
                        info!(from = %self.status, to = %status, "Status changed");
                    }
                    self.status = status;
                }
            }
        }
        appended
    }

    /// Log a finished control request
    pub fn record_outcome(&mut self, outcome: &ApiOutcome) -> String {
        let line = outcome.describe();
        self.log.append_line(&line);
        line
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_status_and_appends() {
        let mut console = Console::new();
        assert_eq!(console.status(), Status::Disconnected);

        let appended = console.apply([
            Effect::SetStatus(Status::Connected),
            Effect::Log("OPEN ws://h/chat".into()),
            Effect::SetStatus(Status::Error),
        ]);
        assert_eq!(appended, vec!["OPEN ws://h/chat".to_string()]);
        assert_eq!(console.status(), Status::Error);
        assert_eq!(console.log().text(), "OPEN ws://h/chat\n");
    }

    #[test]
    fn test_clear_keeps_status() {
        let mut console = Console::new();
        console.apply([Effect::SetStatus(Status::Connected), Effect::Log("x".into())]);
        console.clear();
        assert!(console.log().is_empty());
        assert_eq!(console.status(), Status::Connected);
    }

    #[test]
    fn test_record_outcome_appends_line() {
        let mut console = Console::new();
        let line = console.record_outcome(&ApiOutcome {
            path: "/api/sendLong".into(),
            result: Ok("sent 130B text to 1 clients\n".into()),
        });
        assert_eq!(line, "API /api/sendLong → sent 130B text to 1 clients");
        assert_eq!(console.log().len(), 1);
    }
}
