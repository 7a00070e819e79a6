//! Native probe session: connection manager, console and control client
//! driven from one loop

use crate::api_native::ApiClient;
use crate::config::ProbeConfig;
use crate::core::{ApiOutcome, Command, ConnectionId, ConnectionManager, Console, ProbeResult, WsEvent};
use crate::repl::{ReplCommand, HELP};
use crate::websocket_native::{EventSender, NativeConnector};
use crate::ws_state::WsState;
use tokio::sync::mpsc::UnboundedSender;

pub struct Probe {
    manager: ConnectionManager<NativeConnector>,
    console: Console,
    api: ApiClient,
    outcomes: UnboundedSender<ApiOutcome>,
    default_url: String,
}

impl Probe {
    pub fn new(
        config: &ProbeConfig,
        events: EventSender,
        outcomes: UnboundedSender<ApiOutcome>,
    ) -> ProbeResult<Self> {
        Ok(Self {
            manager: ConnectionManager::new(NativeConnector::new(events)),
            console: Console::new(),
            api: ApiClient::new(&config.api_base)?,
            outcomes,
            default_url: config.ws_url.clone(),
        })
    }

    /// Run a REPL command, returning the lines to print
    pub fn execute(&mut self, cmd: ReplCommand) -> Vec<String> {
        match cmd {
            ReplCommand::Connect(url) => {
                let url = url.unwrap_or_else(|| self.default_url.clone());
                let effects = self.manager.connect(&url);
                self.console.apply(effects)
            }
            ReplCommand::Disconnect => {
                let command = self.manager.disconnect();
                self.dispatch(&command);
                Vec::new()
            }
            ReplCommand::Dispatch(command) => {
                self.dispatch(&command);
                Vec::new()
            }
            ReplCommand::Status => vec![format!(
                "status: {} (connection {}{})",
                self.console.status(),
                self.manager.state(),
                self.manager
                    .url()
                    .map(|u| format!(" to {u}"))
                    .unwrap_or_default()
            )],
            ReplCommand::Clear => {
                self.console.clear();
                Vec::new()
            }
            ReplCommand::Help => vec![HELP.to_string()],
            ReplCommand::Quit | ReplCommand::Empty => Vec::new(),
        }
    }

    pub fn on_event(&mut self, id: ConnectionId, event: WsEvent) -> Vec<String> {
        let effects = self.manager.handle(id, event);
        self.console.apply(effects)
    }

    pub fn on_outcome(&mut self, outcome: ApiOutcome) -> Vec<String> {
        vec![self.console.record_outcome(&outcome)]
    }

    pub fn dispatch(&self, command: &Command) {
        self.api.dispatch(command, self.outcomes.clone());
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn state(&self) -> WsState {
        self.manager.state()
    }
}
