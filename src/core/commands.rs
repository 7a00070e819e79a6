//! Server-side test actions triggered over the HTTP control surface

use super::error::ProbeResult;
use super::log::log_line;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Message sent when the text input is blank
pub const DEFAULT_TEXT: &str = "hello from URFU";
/// Byte count used by the binary button
pub const DEFAULT_BINARY_LEN: usize = 32;

/// Characters left alone by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// One-shot control request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SendText(String),
    SendLong,
    SendBinary(usize),
    Ping,
    Close {
        code: Option<u16>,
        reason: Option<String>,
    },
}

impl Command {
    /// Send-text from raw user input, falling back to [`DEFAULT_TEXT`]
    pub fn send_text(input: &str) -> Self {
        let text = input.trim();
        let text = if text.is_empty() { DEFAULT_TEXT } else { text };
        Command::SendText(text.to_string())
    }

    pub fn close() -> Self {
        Command::Close {
            code: None,
            reason: None,
        }
    }

    /// Request path including the query string
    pub fn path(&self) -> String {
        match self {
            Command::SendText(msg) => format!("/api/sendText?msg={}", encode(msg)),
            Command::SendLong => "/api/sendLong".to_string(),
            Command::SendBinary(n) => format!("/api/sendBin?n={n}"),
            Command::Ping => "/api/ping".to_string(),
            Command::Close { code, reason } => {
                let mut query = Vec::new();
                if let Some(code) = code {
                    query.push(format!("code={code}"));
                }
                if let Some(reason) = reason {
                    query.push(format!("reason={}", encode(reason)));
                }
                if query.is_empty() {
                    "/api/close".to_string()
                } else {
                    format!("/api/close?{}", query.join("&"))
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::SendText(_) => "send-text",
            Command::SendLong => "send-long",
            Command::SendBinary(_) => "send-binary",
            Command::Ping => "ping",
            Command::Close { .. } => "close",
        }
    }
}

/// Completed control request, delivered back to the front end
#[derive(Clone, Debug)]
pub struct ApiOutcome {
    pub path: String,
    pub result: ProbeResult<String>,
}

impl ApiOutcome {
    /// Log line for this outcome
    pub fn describe(&self) -> String {
        match &self.result {
            Ok(body) => log_line!("API", self.path, "→", body.trim()),
            Err(e) => log_line!("API error:", e),
        }
    }
}
