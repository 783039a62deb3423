// Repeating status checks driven by a `gloo-timers` interval.

use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use super::{StatusDisplay, StatusPoller, StatusSource};

/// Handle to a running poll loop. Stopping (or dropping) cancels the interval;
/// a check already in flight still completes and renders.
pub struct PollSchedule {
    interval: Option<Interval>,
}

impl PollSchedule {
    /// Render the initial label and check immediately, then every `interval_ms`.
    pub fn start<S, D>(poller: Rc<StatusPoller<S, D>>, interval_ms: u32) -> Self
    where
        S: StatusSource + 'static,
        D: StatusDisplay + 'static,
    {
        {
            let poller = poller.clone();
            spawn_local(async move {
                poller.start().await;
            });
        }
        let interval = Interval::new(interval_ms, move || {
            let poller = poller.clone();
            spawn_local(async move {
                poller.check().await;
            });
        });
        tracing::info!(interval_ms, "server status polling started");
        Self {
            interval: Some(interval),
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
            tracing::info!("server status polling stopped");
        }
    }
}
