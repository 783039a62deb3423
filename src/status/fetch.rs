// Browser-side status source and display: `gloo-net` request raced against a
// `gloo-timers` deadline, and the status text element.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::{AbortController, AbortSignal, Element};

use super::{
    ServerStatus, StatusDisplay, StatusError, StatusSource, classify_rejection, parse_status_body,
    with_deadline,
};
use crate::config::GatewayConfig;

/// Queries the status API with `fetch`, aborting after `timeout_ms`.
pub struct FetchStatusSource {
    url: String,
    timeout_ms: u32,
}

impl FetchStatusSource {
    pub fn new(url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            url: url.into(),
            timeout_ms,
        }
    }

    pub fn from_config(cfg: &GatewayConfig) -> Self {
        Self::new(cfg.endpoint_url(), cfg.request_timeout_ms)
    }

    async fn request(&self, signal: &AbortSignal) -> Result<bool, StatusError> {
        let resp = Request::get(&self.url)
            .abort_signal(Some(signal))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        if !resp.ok() {
            return Err(StatusError::Http(resp.status()));
        }
        let body = resp.text().await.map_err(|e| self.request_error(e))?;
        parse_status_body(&body)
    }

    fn request_error(&self, err: gloo_net::Error) -> StatusError {
        match err {
            gloo_net::Error::JsError(js) => classify_rejection(&js.name, js.message, self.timeout_ms),
            other => StatusError::Network(other.to_string()),
        }
    }
}

impl StatusSource for FetchStatusSource {
    async fn fetch_online(&self) -> Result<bool, StatusError> {
        let controller = AbortController::new()
            .map_err(|e| StatusError::Network(format!("AbortController unavailable: {e:?}")))?;

        tracing::debug!(url = %self.url, "checking server status");
        // The deadline also covers reading the body.
        let outcome = with_deadline(
            self.request(&controller.signal()),
            TimeoutFuture::new(self.timeout_ms),
            self.timeout_ms,
        )
        .await;
        if outcome.as_ref().is_err_and(StatusError::is_timeout) {
            controller.abort();
        }
        outcome
    }
}

/// Writes the coloured status label into a page element.
pub struct ElementDisplay {
    element: Element,
}

impl ElementDisplay {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl StatusDisplay for ElementDisplay {
    fn render(&self, status: ServerStatus) {
        self.element.set_inner_html(&status.label().to_html());
    }
}
