//! WebSocket probe - diagnostic client for a WebSocket test endpoint
//!
//! Opens and closes one connection, logs inbound frames and triggers
//! server-side test actions through the HTTP control surface:
//! - Browser page (`wasm` feature): egui UI over `WebSocket` and `fetch`
//! - Native REPL (`cli` feature): tokio-tungstenite and reqwest

pub mod config;
pub mod core;
#[cfg(feature = "cli")]
pub mod repl;
pub mod ws_state;

#[cfg(feature = "cli")]
pub mod api_native;
#[cfg(feature = "cli")]
pub mod probe;
#[cfg(feature = "cli")]
pub mod websocket_native;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod api_wasm;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod app;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod theme;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod websocket_wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web {
    use tracing::error;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::ProbeApp;

    /// Id of the canvas the page provides
    const CANVAS_ID: &str = "probe_canvas";

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async {
            let Some(canvas) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(CANVAS_ID))
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            else {
                error!(id = CANVAS_ID, "No canvas element to render into");
                return;
            };

            if let Err(e) = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(ProbeApp::new(cc)))),
                )
                .await
            {
                error!(error = ?e, "Failed to start eframe");
            }
        });
    }
}
