//! Shared WebSocket connection state
//!
//! Used by both the browser and native front ends.

use std::fmt;

/// Lifecycle of the single probe connection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WsState {
    #[default]
    Idle,
    Connecting,
    Open,
    Closed,
    Error,
}

impl WsState {
    pub fn is_open(&self) -> bool {
        matches!(self, WsState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WsState::Idle => "idle",
            WsState::Connecting => "connecting",
            WsState::Open => "open",
            WsState::Closed => "closed",
            WsState::Error => "error",
        }
    }
}

impl fmt::Display for WsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value shown by the status indicator, overwritten on every transition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    Connected,
    #[default]
    Disconnected,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Connected => "connected",
            Status::Disconnected => "disconnected",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
