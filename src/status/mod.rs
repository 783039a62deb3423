//! Minecraft server status polling.
//!
//! The tri-state [`ServerStatus`] is owned by a [`StatusPoller`]; nothing else
//! writes it. Network access and rendering sit behind [`StatusSource`] and
//! [`StatusDisplay`] so the state machine runs natively in tests. Browser
//! implementations live in `fetch` and the repeating timer in `schedule`.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};
use serde::Deserialize;
use thiserror::Error;

pub mod fetch;
pub mod schedule;

pub use fetch::{ElementDisplay, FetchStatusSource};
pub use schedule::PollSchedule;

pub const ONLINE_COLOR: &str = "#55ff55";
pub const OFFLINE_COLOR: &str = "#ff5555";
pub const CHECKING_COLOR: &str = "#ffff55";

// --- Status model ------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServerStatus {
    /// No check has resolved yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ServerStatus {
    /// Next state after a check. A failure only downgrades to `Offline` when no
    /// status has ever been established; otherwise the last known value stays.
    pub fn resolve(self, outcome: &Result<bool, StatusError>) -> Self {
        match outcome {
            Ok(true) => ServerStatus::Online,
            Ok(false) => ServerStatus::Offline,
            Err(_) if self == ServerStatus::Unknown => ServerStatus::Offline,
            Err(_) => self,
        }
    }

    pub fn label(self) -> StatusLabel {
        match self {
            ServerStatus::Online => StatusLabel::new("Online", ONLINE_COLOR),
            ServerStatus::Offline => StatusLabel::new("Offline", OFFLINE_COLOR),
            ServerStatus::Unknown => StatusLabel::new("Checking...", CHECKING_COLOR),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServerStatus::Unknown => "unknown",
            ServerStatus::Online => "online",
            ServerStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coloured text shown in the status element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusLabel {
    pub text: &'static str,
    pub color: &'static str,
}

impl StatusLabel {
    const fn new(text: &'static str, color: &'static str) -> Self {
        Self { text, color }
    }

    pub fn to_html(&self) -> String {
        format!(r#"<span style="color: {};">{}</span>"#, self.color, self.text)
    }
}

// --- Errors & response parsing -----------------------------------------------

/// Why a status check failed. Every variant is handled the same way by the poller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),

    #[error("Unexpected HTTP status {0}")]
    Http(u16),

    #[error("Malformed status response: {0}")]
    Malformed(String),
}

impl StatusError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, StatusError::Timeout(_))
    }
}

/// Subset of the status API body we rely on.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub online: bool,
}

pub fn parse_status_body(body: &str) -> Result<bool, StatusError> {
    serde_json::from_str::<StatusResponse>(body)
        .map(|resp| resp.online)
        .map_err(|e| StatusError::Malformed(e.to_string()))
}

/// Map a rejected fetch to an error class. Aborts count as timeouts: the only
/// abort source is the request deadline.
pub fn classify_rejection(exception_name: &str, detail: String, timeout_ms: u32) -> StatusError {
    if exception_name == "AbortError" {
        StatusError::Timeout(timeout_ms)
    } else {
        StatusError::Network(detail)
    }
}

/// Race a check against `deadline`. If the deadline fires first the check is
/// dropped and a [`StatusError::Timeout`] is returned.
pub async fn with_deadline<F, D>(check: F, deadline: D, timeout_ms: u32) -> Result<bool, StatusError>
where
    F: Future<Output = Result<bool, StatusError>>,
    D: Future<Output = ()>,
{
    let check = pin!(check);
    let deadline = pin!(deadline);
    match select(check, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(StatusError::Timeout(timeout_ms)),
    }
}

// --- Poller ------------------------------------------------------------------

/// Where status checks get the server's `online` flag from.
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn fetch_online(&self) -> Result<bool, StatusError>;
}

/// Receives the status after every check.
pub trait StatusDisplay {
    fn render(&self, status: ServerStatus);
}

pub struct StatusPoller<S, D> {
    source: S,
    display: D,
    state: RefCell<ServerStatus>,
}

impl<S: StatusSource, D: StatusDisplay> StatusPoller<S, D> {
    pub fn new(source: S, display: D) -> Self {
        Self {
            source,
            display,
            state: RefCell::new(ServerStatus::Unknown),
        }
    }

    /// Build a poller only when a display exists. The source is not created (and
    /// therefore never queried) otherwise.
    pub fn activate(display: Option<D>, make_source: impl FnOnce() -> S) -> Option<Self> {
        display.map(|display| Self::new(make_source(), display))
    }

    pub fn status(&self) -> ServerStatus {
        *self.state.borrow()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn render_current(&self) {
        self.display.render(self.status());
    }

    /// First cycle after activation: show the current label ("Checking..."
    /// on a fresh poller), then check immediately.
    pub async fn start(&self) -> ServerStatus {
        self.render_current();
        self.check().await
    }

    /// Run one check: fetch, update state, render. Failures are logged and folded
    /// into the state; nothing propagates. The state is not borrowed across the
    /// await, so overlapping checks resolve last-writer-wins.
    pub async fn check(&self) -> ServerStatus {
        let outcome = self.source.fetch_online().await;
        if let Err(err) = &outcome {
            tracing::error!(error = %err, timeout = err.is_timeout(), "server status check failed");
        }
        let status = {
            let mut state = self.state.borrow_mut();
            *state = state.resolve(&outcome);
            *state
        };
        tracing::debug!(%status, "server status updated");
        self.display.render(status);
        status
    }
}
