//! Native WebSocket transport for the probe
//!
//! Each connection runs as a tokio task that forwards tagged [`WsEvent`]s
//! over an unbounded channel. The main loop is the only consumer, so all
//! state changes happen in one place.

use crate::core::{ConnectionId, Connector, ProbeError, ProbeResult, WsEvent};
use crate::core::session::{CLOSE_ABNORMAL, CLOSE_NO_STATUS};
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::Uri;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// Sender half carrying events from connection tasks
pub type EventSender = UnboundedSender<(ConnectionId, WsEvent)>;

/// Check that `url` is a usable ws:// or wss:// endpoint
pub fn validate_endpoint(url: &str) -> ProbeResult<Uri> {
    let invalid = |reason: String| ProbeError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let uri: Uri = url.parse().map_err(|e| invalid(format!("{e}")))?;
    match uri.scheme_str() {
        Some("ws") | Some("wss") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme {other:?}"))),
        None => return Err(invalid("missing ws:// or wss:// scheme".to_string())),
    }
    if uri.host().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(uri)
}

/// Spawns one connection task per [`Connector::open`]
pub struct NativeConnector {
    tx: EventSender,
}

impl NativeConnector {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }
}

/// Running connection task
///
/// Dropping it detaches the task; there is no local close.
pub struct NativeConnection {
    #[allow(dead_code)]
    task: JoinHandle<()>,
}

impl Connector for NativeConnector {
    type Handle = NativeConnection;

    fn open(&mut self, url: &str, id: ConnectionId) -> ProbeResult<NativeConnection> {
        let uri = validate_endpoint(url)?;
        let request = uri.into_client_request().map_err(|e| ProbeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let task = tokio::spawn(run_websocket(request, id, self.tx.clone()));
        Ok(NativeConnection { task })
    }
}

async fn run_websocket(request: Request, id: ConnectionId, tx: EventSender) {
    let forward = |event: WsEvent| tx.send((id, event)).is_ok();

    let uri = request.uri().to_string();
    info!(id, url = %uri, "Connecting to WebSocket");

    let mut ws_stream = match connect_async(request).await {
        Ok((stream, _)) => {
            info!(id, "WebSocket connected");
            if !forward(WsEvent::Open) {
                return;
            }
            stream
        }
        Err(e) => {
            error!(id, error = %e, "Failed to connect");
            // Same sequence a browser reports for a failed handshake
            forward(WsEvent::Error(e.to_string()));
            forward(WsEvent::Close {
                code: CLOSE_ABNORMAL,
                reason: None,
            });
            return;
        }
    };

    // Keep reading after a close frame so the handshake reply gets flushed
    let mut close: Option<(u16, Option<String>)> = None;
    while let Some(msg) = ws_stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                debug!(id, len = text.len(), "Text frame");
                if !forward(WsEvent::Text(text.to_string())) {
                    return;
                }
            }
            Ok(Message::Binary(data)) => {
                debug!(id, len = data.len(), "Binary frame");
                if !forward(WsEvent::Binary(data.len())) {
                    return;
                }
            }
            Ok(Message::Close(frame)) => {
                let (code, reason) = match frame {
                    Some(frame) => {
                        let reason = frame.reason.to_string();
                        (u16::from(frame.code), Some(reason).filter(|r| !r.is_empty()))
                    }
                    None => (CLOSE_NO_STATUS, None),
                };
                warn!(id, code, reason = ?reason, "WebSocket closed by server");
                close = Some((code, reason));
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                debug!(id, "Control frame");
            }
            Ok(_) => {}
            Err(e) => {
                if close.is_some() {
                    debug!(id, error = %e, "Error after close frame");
                    break;
                }
                error!(id, error = %e, "WebSocket error");
                if !forward(WsEvent::Error(e.to_string())) {
                    return;
                }
                break;
            }
        }
    }

    let (code, reason) = close.unwrap_or((CLOSE_ABNORMAL, None));
    debug!(id, code, "WebSocket stream ended");
    forward(WsEvent::Close { code, reason });
}
