//! Browser WebSocket transport for the probe

use crate::core::{describe_error, ConnectionId, Connector, ProbeError, ProbeResult, WsEvent};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{BinaryType, CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

/// Shared event buffer: WS callbacks push, app drains in update()
pub type EventBuffer = Rc<RefCell<VecDeque<(ConnectionId, WsEvent)>>>;

/// Best-effort text for a thrown JS value
pub(crate) fn js_error_text(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Builds a browser `WebSocket` per [`Connector::open`]
pub struct BrowserConnector {
    events: EventBuffer,
}

impl BrowserConnector {
    pub fn new(events: EventBuffer) -> Self {
        Self { events }
    }
}

impl Connector for BrowserConnector {
    type Handle = WsClient;

    fn open(&mut self, url: &str, id: ConnectionId) -> ProbeResult<WsClient> {
        WsClient::connect(url, id, self.events.clone())
    }
}

/// WASM WebSocket client
pub struct WsClient {
    #[allow(dead_code)]
    ws: WebSocket,
}

impl WsClient {
    /// Connect to a WebSocket endpoint
    ///
    /// `WebSocket::new` throws synchronously for malformed URLs; that is
    /// the only construction failure. Everything else lands in `events`.
    pub fn connect(url: &str, id: ConnectionId, events: EventBuffer) -> ProbeResult<Self> {
        info!(url, id, "Connecting to WebSocket");

        let ws = WebSocket::new(url).map_err(|e| ProbeError::InvalidUrl {
            url: url.to_string(),
            reason: js_error_text(&e),
        })?;
        // ArrayBuffer gives the byte length synchronously
        ws.set_binary_type(BinaryType::Arraybuffer);

        let buffer = events.clone();
        let on_open = Closure::wrap(Box::new(move |_| {
            info!(id, "WebSocket connected");
            buffer.borrow_mut().push_back((id, WsEvent::Open));
        }) as Box<dyn Fn(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let buffer = events.clone();
        let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
            let data = e.data();
            let event = if let Some(text) = data.as_string() {
                WsEvent::Text(text)
            } else if let Some(buf) = data.dyn_ref::<js_sys::ArrayBuffer>() {
                WsEvent::Binary(buf.byte_length() as usize)
            } else if let Some(blob) = data.dyn_ref::<web_sys::Blob>() {
                WsEvent::Binary(blob.size() as usize)
            } else {
                warn!(id, "Unrecognised message payload");
                return;
            };
            debug!(id, ?event, "Frame received");
            buffer.borrow_mut().push_back((id, event));
        }) as Box<dyn Fn(MessageEvent)>);
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        // Browsers usually fire a plain Event here, not an ErrorEvent
        let buffer = events.clone();
        let on_err = Closure::wrap(Box::new(move |e: Event| {
            let message = e.dyn_ref::<ErrorEvent>().map(|e| e.message());
            let descriptor = describe_error(message.as_deref(), &e.type_());
            error!(id, error = %descriptor, "WebSocket error");
            buffer.borrow_mut().push_back((id, WsEvent::Error(descriptor)));
        }) as Box<dyn Fn(Event)>);
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));
        on_err.forget();

        let buffer = events;
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            let code = e.code();
            let reason = e.reason();
            warn!(id, code, reason = %reason, "WebSocket closed");
            let reason = (!reason.is_empty()).then_some(reason);
            buffer
                .borrow_mut()
                .push_back((id, WsEvent::Close { code, reason }));
        }) as Box<dyn Fn(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        Ok(Self { ws })
    }
}
