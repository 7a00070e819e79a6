//! Single-slot connection ownership
//!
//! The manager never holds more than one transport. Platform transports plug
//! in through [`Connector`]; everything they report comes back through
//! [`ConnectionManager::handle`] tagged with the id they were opened with.

use super::commands::Command;
use super::error::{ProbeError, ProbeResult};
use super::log::log_line;
use super::session::{transition, Effect, WsEvent};
use crate::ws_state::{Status, WsState};
use tracing::{debug, error, info, warn};

/// Generation id of a connection, used to drop events from replaced ones
pub type ConnectionId = u64;

/// Builds a platform transport for `url`
///
/// Construction must fail synchronously for endpoints that can never work
/// (malformed URL, wrong scheme). Everything after that is reported as
/// [`WsEvent`]s tagged with `id`.
pub trait Connector {
    type Handle;

    fn open(&mut self, url: &str, id: ConnectionId) -> ProbeResult<Self::Handle>;
}

struct Connection<H> {
    id: ConnectionId,
    url: String,
    #[allow(dead_code)]
    handle: H,
}

/// Owner of the single connection and its lifecycle state
pub struct ConnectionManager<C: Connector> {
    connector: C,
    slot: Option<Connection<C::Handle>>,
    state: WsState,
    next_id: ConnectionId,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            slot: None,
            state: WsState::Idle,
            next_id: 1,
        }
    }

    /// Open a connection to `url` unless one is already open
    pub fn connect(&mut self, url: &str) -> Vec<Effect> {
        let url = url.trim();
        if self.state.is_open() {
            warn!(url, "Connect requested while already connected");
            return vec![Effect::Log(ProbeError::AlreadyConnected.to_string())];
        }

        let mut effects = vec![Effect::Log(log_line!("Connecting to", url))];
        let id = self.next_id;
        self.next_id += 1;

        match self.connector.open(url, id) {
            Ok(handle) => {
                info!(url, id, "Connecting");
                if let Some(old) = self.slot.take() {
                    debug!(id = old.id, "Superseding pending connection");
                }
                self.slot = Some(Connection {
                    id,
                    url: url.to_string(),
                    handle,
                });
                self.state = WsState::Connecting;
            }
            Err(e) => {
                error!(url, error = %e, "Failed to construct connection");
                self.state = WsState::Error;
                effects.push(Effect::Log(log_line!("Connect error:", e)));
                effects.push(Effect::SetStatus(Status::Error));
            }
        }
        effects
    }

    /// Apply a transport event from connection `id`
    pub fn handle(&mut self, id: ConnectionId, event: WsEvent) -> Vec<Effect> {
        let Some(conn) = self.slot.as_ref().filter(|c| c.id == id) else {
            debug!(id, ?event, "Discarding event from superseded connection");
            return Vec::new();
        };

        let closing = matches!(event, WsEvent::Close { .. });
        let (next, effects) = transition(self.state, &conn.url, event);
        debug!(id, from = %self.state, to = %next, "Connection transition");
        self.state = next;
        if closing {
            self.slot = None;
        }
        effects
    }

    /// Ask the server to end the connection
    ///
    /// The transport is left untouched; its close event arrives through
    /// [`handle`](Self::handle) once the server acts on the request.
    pub fn disconnect(&self) -> Command {
        info!(state = %self.state, "Requesting server-side close");
        Command::close()
    }

    pub fn state(&self) -> WsState {
        self.state
    }

    /// Id of the connection currently in the slot
    pub fn current_id(&self) -> Option<ConnectionId> {
        self.slot.as_ref().map(|c| c.id)
    }

    pub fn url(&self) -> Option<&str> {
        self.slot.as_ref().map(|c| c.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every transport it is asked to build
    #[derive(Default)]
    struct FakeConnector {
        opened: Vec<(String, ConnectionId)>,
        fail: bool,
    }

    impl Connector for FakeConnector {
        type Handle = ();

        fn open(&mut self, url: &str, id: ConnectionId) -> ProbeResult<()> {
            if self.fail {
                return Err(ProbeError::InvalidUrl {
                    url: url.to_string(),
                    reason: "bad scheme".into(),
                });
            }
            self.opened.push((url.to_string(), id));
            Ok(())
        }
    }

    fn open_manager() -> (ConnectionManager<FakeConnector>, ConnectionId) {
        let mut manager = ConnectionManager::new(FakeConnector::default());
        manager.connect("ws://h/chat");
        let id = manager.current_id().unwrap();
        manager.handle(id, WsEvent::Open);
        (manager, id)
    }

    #[test]
    fn test_connect_registers_connection() {
        let mut manager = ConnectionManager::new(FakeConnector::default());
        let effects = manager.connect("  ws://h/chat ");
        assert_eq!(effects, vec![Effect::Log("Connecting to ws://h/chat".into())]);
        assert_eq!(manager.state(), WsState::Connecting);
        assert_eq!(manager.url(), Some("ws://h/chat"));
        assert_eq!(manager.connector.opened.len(), 1);
    }

    #[test]
    fn test_connect_while_open_is_rejected() {
        let (mut manager, id) = open_manager();
        let effects = manager.connect("ws://other/chat");
        assert_eq!(effects, vec![Effect::Log("Already connected".into())]);
        assert_eq!(manager.connector.opened.len(), 1);
        assert_eq!(manager.current_id(), Some(id));
        assert_eq!(manager.state(), WsState::Open);
    }

    #[test]
    fn test_construction_failure_sets_error() {
        let mut manager = ConnectionManager::new(FakeConnector {
            fail: true,
            ..Default::default()
        });
        let effects = manager.connect("http://h");
        assert_eq!(effects.len(), 3);
        match &effects[1] {
            Effect::Log(line) => assert!(line.starts_with("Connect error: "), "{line}"),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(effects[2], Effect::SetStatus(Status::Error));
        assert_eq!(manager.state(), WsState::Error);
        assert_eq!(manager.current_id(), None);
    }

    #[test]
    fn test_close_releases_slot_and_allows_reconnect() {
        let (mut manager, id) = open_manager();
        manager.handle(
            id,
            WsEvent::Close {
                code: 1000,
                reason: None,
            },
        );
        assert_eq!(manager.state(), WsState::Closed);
        assert_eq!(manager.current_id(), None);

        manager.connect("ws://h/chat");
        assert_eq!(manager.connector.opened.len(), 2);
        assert_ne!(manager.current_id(), Some(id));
    }

    #[test]
    fn test_error_keeps_slot_until_close() {
        let (mut manager, id) = open_manager();
        manager.handle(id, WsEvent::Error("reset".into()));
        assert_eq!(manager.state(), WsState::Error);
        assert_eq!(manager.current_id(), Some(id));

        let effects = manager.handle(
            id,
            WsEvent::Close {
                code: 1006,
                reason: None,
            },
        );
        assert!(effects.contains(&Effect::Log("CLOSE 1006 ".into())));
        assert_eq!(manager.current_id(), None);
    }

    #[test]
    fn test_superseded_events_are_dropped() {
        let mut manager = ConnectionManager::new(FakeConnector::default());
        manager.connect("ws://first/chat");
        let first = manager.current_id().unwrap();
        manager.connect("ws://second/chat");
        let second = manager.current_id().unwrap();

        assert!(manager.handle(first, WsEvent::Open).is_empty());
        assert_eq!(manager.state(), WsState::Connecting);

        let effects = manager.handle(second, WsEvent::Open);
        assert!(effects.contains(&Effect::Log("OPEN ws://second/chat".into())));
    }

    #[test]
    fn test_disconnect_leaves_transport_alone() {
        let (manager, id) = open_manager();
        let command = manager.disconnect();
        assert_eq!(command.path(), "/api/close");
        assert_eq!(manager.state(), WsState::Open);
        assert_eq!(manager.current_id(), Some(id));
    }
}
