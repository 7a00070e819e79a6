//! Browser client for the HTTP control surface, via `fetch`

use crate::core::{ApiOutcome, Command, ProbeError, ProbeResult};
use crate::websocket_wasm::js_error_text;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Finished requests waiting to be logged by the app
pub type OutcomeBuffer = Rc<RefCell<VecDeque<ApiOutcome>>>;

/// POST `path` (relative to the page origin) and return the reply text
pub async fn invoke(path: &str) -> ProbeResult<String> {
    let fail = |e: &wasm_bindgen::JsValue| ProbeError::http(path, js_error_text(e));

    let window = web_sys::window().ok_or_else(|| ProbeError::http(path, "no window"))?;
    let opts = RequestInit::new();
    opts.set_method("POST");
    let request = Request::new_with_str_and_init(path, &opts).map_err(|e| fail(&e))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fail(&e))?
        .dyn_into()
        .map_err(|e| fail(&e))?;

    let body = JsFuture::from(response.text().map_err(|e| fail(&e))?)
        .await
        .map_err(|e| fail(&e))?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        warn!(path, status = response.status(), "Control request rejected");
    }
    Ok(body)
}

/// Fire `command` without waiting; its outcome is queued on `outcomes`
pub fn dispatch(command: &Command, outcomes: OutcomeBuffer) {
    let path = command.path();
    debug!(command = command.name(), path = %path, "Dispatching");
    wasm_bindgen_futures::spawn_local(async move {
        let result = invoke(&path).await;
        outcomes.borrow_mut().push_back(ApiOutcome { path, result });
    });
}
