//! Line commands understood by the native probe

use crate::core::{Command, ProbeError, ProbeResult, DEFAULT_BINARY_LEN};

pub const HELP: &str = "\
commands:
  connect [url]          open the WebSocket (default endpoint if omitted)
  disconnect             ask the server to close the connection
  send [text]            server sends text (blank: default message)
  long                   server sends a long text message
  bin [n]                server sends n binary bytes (default 32)
  ping                   server pings the connection
  close [code] [reason]  server closes with an explicit code/reason
  status                 show connection state
  clear                  clear the log
  help                   show this help
  quit                   exit";

/// Parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Connect(Option<String>),
    Disconnect,
    Dispatch(Command),
    Status,
    Clear,
    Help,
    Quit,
    Empty,
}

fn usage(message: impl Into<String>) -> ProbeError {
    ProbeError::Usage(format!("{} (type `help`)", message.into()))
}

/// Turn one raw stdin line into text, replacing invalid UTF-8
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

pub fn parse_line(line: &str) -> ProbeResult<ReplCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "" => ReplCommand::Empty,
        "connect" | "c" => {
            ReplCommand::Connect((!rest.is_empty()).then(|| rest.to_string()))
        }
        "disconnect" | "d" => ReplCommand::Disconnect,
        "send" | "s" => ReplCommand::Dispatch(Command::send_text(rest)),
        "long" => ReplCommand::Dispatch(Command::SendLong),
        "bin" => {
            let n = if rest.is_empty() {
                DEFAULT_BINARY_LEN
            } else {
                rest.parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| usage(format!("bin expects a positive byte count, got {rest:?}")))?
            };
            ReplCommand::Dispatch(Command::SendBinary(n))
        }
        "ping" => ReplCommand::Dispatch(Command::Ping),
        "close" => {
            let (code, reason) = match rest.split_once(char::is_whitespace) {
                Some((code, reason)) => (code, reason.trim()),
                None => (rest, ""),
            };
            let code = if code.is_empty() {
                None
            } else {
                Some(
                    code.parse::<u16>()
                        .map_err(|_| usage(format!("close expects a numeric code, got {code:?}")))?,
                )
            };
            let reason = (!reason.is_empty()).then(|| reason.to_string());
            ReplCommand::Dispatch(Command::Close { code, reason })
        }
        "status" => ReplCommand::Status,
        "clear" => ReplCommand::Clear,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(usage(format!("unknown command {other:?}"))),
    };
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connect() {
        assert_eq!(parse_line("connect").unwrap(), ReplCommand::Connect(None));
        assert_eq!(
            parse_line("  connect   ws://h:1/chat ").unwrap(),
            ReplCommand::Connect(Some("ws://h:1/chat".into()))
        );
    }

    #[test]
    fn test_parse_send_keeps_inner_spaces() {
        assert_eq!(
            parse_line("send x y").unwrap(),
            ReplCommand::Dispatch(Command::SendText("x y".into()))
        );
        assert_eq!(
            parse_line("send").unwrap(),
            ReplCommand::Dispatch(Command::send_text(""))
        );
    }

    #[test]
    fn test_parse_bin() {
        assert_eq!(
            parse_line("bin").unwrap(),
            ReplCommand::Dispatch(Command::SendBinary(32))
        );
        assert_eq!(
            parse_line("bin 1024").unwrap(),
            ReplCommand::Dispatch(Command::SendBinary(1024))
        );
        assert!(matches!(parse_line("bin 0"), Err(ProbeError::Usage(_))));
        assert!(matches!(parse_line("bin lots"), Err(ProbeError::Usage(_))));
    }

    #[test]
    fn test_parse_close() {
        assert_eq!(
            parse_line("close").unwrap(),
            ReplCommand::Dispatch(Command::close())
        );
        assert_eq!(
            parse_line("close 4000 going away").unwrap(),
            ReplCommand::Dispatch(Command::Close {
                code: Some(4000),
                reason: Some("going away".into()),
            })
        );
        assert!(matches!(parse_line("close soon"), Err(ProbeError::Usage(_))));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_line("").unwrap(), ReplCommand::Empty);
        assert_eq!(parse_line("PING").unwrap(), ReplCommand::Dispatch(Command::Ping));
        assert_eq!(parse_line("long").unwrap(), ReplCommand::Dispatch(Command::SendLong));
        assert_eq!(parse_line("disconnect").unwrap(), ReplCommand::Disconnect);
        assert_eq!(parse_line("quit").unwrap(), ReplCommand::Quit);
        assert!(matches!(parse_line("launch"), Err(ProbeError::Usage(_))));
    }

    #[test]
    fn test_decode_line_strips_line_ending() {
        assert_eq!(decode_line(b"status\r\n"), "status");
        assert_eq!(decode_line(b"send x y\n"), "send x y");
        assert_eq!(decode_line(b""), "");
    }

    #[test]
    fn test_invalid_utf8_is_a_usage_error() {
        let line = decode_line(b"\xff\xfe\n");
        assert_eq!(line, "\u{FFFD}\u{FFFD}");
        assert!(matches!(parse_line(&line), Err(ProbeError::Usage(_))));

        // Valid command word, broken argument bytes
        assert_eq!(
            parse_line(&decode_line(b"send caf\xe9")).unwrap(),
            ReplCommand::Dispatch(Command::SendText("caf\u{FFFD}".into()))
        );
    }
}
