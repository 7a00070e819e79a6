//! Platform-agnostic core module - shared between the browser page and CLI

pub mod commands;
pub mod console;
pub mod error;
pub mod log;
pub mod manager;
pub mod session;

pub use commands::{ApiOutcome, Command, DEFAULT_BINARY_LEN, DEFAULT_TEXT};
pub use console::Console;
pub use error::{ProbeError, ProbeResult};
pub use log::LogSink;
pub use manager::{ConnectionId, ConnectionManager, Connector};
pub use session::{describe_error, transition, Effect, WsEvent};
