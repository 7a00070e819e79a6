//! Native client for the HTTP control surface

use crate::core::{ApiOutcome, Command, ProbeError, ProbeResult};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Posts commands to `<base><path>`
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> ProbeResult<Self> {
        reqwest::Url::parse(base)
            .map_err(|e| ProbeError::Config(format!("invalid API base {base:?}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// POST `path` with no body and return the reply text
    ///
    /// Network failures and unreadable bodies are reported as
    /// [`ProbeError::Http`]; a non-2xx reply still returns its body.
    pub async fn invoke(&self, path: &str) -> ProbeResult<String> {
        let url = self.url_for(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ProbeError::http(path, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::http(path, e))?;

        // The reply body is logged either way; only the trace notes the status
        if !status.is_success() {
            warn!(path, status = %status, "Control request rejected");
        }
        Ok(body)
    }

    /// Run `command` in its own task and report the outcome on `outcomes`
    ///
    /// Outcomes of concurrent commands arrive in completion order.
    pub fn dispatch(&self, command: &Command, outcomes: UnboundedSender<ApiOutcome>) {
        let api = self.clone();
        let path = command.path();
        debug!(command = command.name(), path = %path, "Dispatching");
        tokio::spawn(async move {
            let result = api.invoke(&path).await;
            if outcomes.send(ApiOutcome { path, result }).is_err() {
                debug!("Outcome receiver dropped");
            }
        });
    }
}
