//! Browser probe page
//!
//! WebSocket callbacks and fetch continuations only push into buffers;
//! `update()` drains them, so all state lives in the app and is touched from
//! one place.

mod controls;
mod log_view;

use eframe::egui;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::info;

use crate::api_wasm::{self, OutcomeBuffer};
use crate::config::DEFAULT_WS_URL;
use crate::core::{Command, ConnectionManager, Console};
use crate::theme::{colors, minimal_visuals};
use crate::websocket_wasm::{BrowserConnector, EventBuffer};

/// `ws(s)://<page host>/chat`, falling back to the default endpoint
fn default_endpoint() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return DEFAULT_WS_URL.to_string();
    };
    match (location.protocol(), location.host()) {
        (Ok(protocol), Ok(host)) if !host.is_empty() => {
            let scheme = if protocol == "https:" { "wss" } else { "ws" };
            format!("{scheme}://{host}/chat")
        }
        _ => DEFAULT_WS_URL.to_string(),
    }
}

pub struct ProbeApp {
    manager: ConnectionManager<BrowserConnector>,
    console: Console,
    events: EventBuffer,
    outcomes: OutcomeBuffer,
    /// Endpoint input field
    pub(crate) endpoint: String,
    /// Text input for the send-text command
    pub(crate) text_input: String,
}

impl ProbeApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(minimal_visuals());

        let events: EventBuffer = Rc::new(RefCell::new(VecDeque::new()));
        let outcomes: OutcomeBuffer = Rc::new(RefCell::new(VecDeque::new()));
        let endpoint = default_endpoint();
        info!(endpoint = %endpoint, "Probe page ready");

        Self {
            manager: ConnectionManager::new(BrowserConnector::new(events.clone())),
            console: Console::new(),
            events,
            outcomes,
            endpoint,
            text_input: String::new(),
        }
    }

    /// Apply everything the callbacks queued since the last frame
    fn drain(&mut self) {
        let events: Vec<_> = self.events.borrow_mut().drain(..).collect();
        for (id, event) in events {
            let effects = self.manager.handle(id, event);
            self.console.apply(effects);
        }

        let outcomes: Vec<_> = self.outcomes.borrow_mut().drain(..).collect();
        for outcome in &outcomes {
            self.console.record_outcome(outcome);
        }
    }

    pub(crate) fn connect(&mut self) {
        let effects = self.manager.connect(&self.endpoint);
        self.console.apply(effects);
    }

    pub(crate) fn disconnect(&mut self) {
        let command = self.manager.disconnect();
        self.dispatch(&command);
    }

    pub(crate) fn dispatch(&self, command: &Command) {
        api_wasm::dispatch(command, self.outcomes.clone());
    }

    pub(crate) fn clear_log(&mut self) {
        self.console.clear();
    }
}

impl eframe::App for ProbeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Callbacks cannot wake egui, so keep polling the buffers
        ctx.request_repaint();
        self.drain();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(12.0))
            .show(ctx, |ui| {
                self.render_controls(ui);
                ui.add_space(8.0);
                self.render_log(ui);
            });
    }
}
