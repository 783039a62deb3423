//! Venb Gateway page script.
//!
//! Two independent enhancements for the landing page, wired once the DOM has
//! loaded: a pointer-driven 3D tilt on every `.card`, and a periodic online
//! check of the Minecraft server rendered into `#minecraft-status-text`.
//!
//! The host page calls `start_gateway()` (or `start_gateway_with_config`) from
//! its `DOMContentLoaded` handler. The running gateway is owned by this crate
//! until `stop_gateway()`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, window};

pub mod config;
pub mod dom;
pub mod logging;
pub mod status;
pub mod tilt;

pub use config::{ConfigError, GatewayConfig};
pub use status::{ServerStatus, StatusError, StatusPoller};
pub use tilt::{Tilt, TiltController, TiltParams};

use dom::TiltListeners;
use status::{ElementDisplay, FetchStatusSource, PollSchedule};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

type PagePoller = StatusPoller<FetchStatusSource, ElementDisplay>;

/// Running page enhancements: tilt listeners plus the optional status poll loop.
struct Gateway {
    _tilt: TiltListeners,
    card_count: usize,
    poller: Option<Rc<PagePoller>>,
    schedule: Option<PollSchedule>,
}

// The started gateway lives for the page; only `stop_gateway` tears it down.
thread_local! {
    static GATEWAY: RefCell<Option<Gateway>> = const { RefCell::new(None) };
}

/// Start with default settings. Call once the DOM has loaded; a second call
/// replaces the running gateway.
#[wasm_bindgen]
pub fn start_gateway() -> Result<(), JsValue> {
    install(launch(&GatewayConfig::default())?);
    Ok(())
}

/// Same as `start_gateway` with a JSON object overriding config fields.
#[wasm_bindgen]
pub fn start_gateway_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = GatewayConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(launch(&cfg)?);
    Ok(())
}

/// Detach tilt listeners and cancel status polling.
#[wasm_bindgen]
pub fn stop_gateway() {
    if let Some(mut gateway) = GATEWAY.with(|g| g.borrow_mut().take()) {
        if let Some(schedule) = gateway.schedule.as_mut() {
            schedule.stop();
        }
        tracing::info!("Venb Gateway stopped");
    }
}

/// `"unknown"`, `"online"` or `"offline"`; `undefined` when not started or the
/// page has no status element.
#[wasm_bindgen]
pub fn gateway_server_status() -> Option<String> {
    with_gateway(|g| g.poller.as_ref().map(|p| p.status().as_str().to_string())).flatten()
}

/// Number of cards with tilt listeners; `undefined` when not started.
#[wasm_bindgen]
pub fn gateway_card_count() -> Option<usize> {
    with_gateway(|g| g.card_count)
}

#[wasm_bindgen]
pub fn gateway_is_polling() -> bool {
    with_gateway(|g| g.schedule.as_ref().is_some_and(PollSchedule::is_running)).unwrap_or(false)
}

fn with_gateway<R>(f: impl FnOnce(&Gateway) -> R) -> Option<R> {
    GATEWAY.with(|g| g.borrow().as_ref().map(f))
}

fn install(gateway: Gateway) {
    // Replace outside the borrow so the previous gateway drops after release.
    let previous = GATEWAY.with(|g| g.borrow_mut().replace(gateway));
    drop(previous);
}

fn launch(cfg: &GatewayConfig) -> Result<Gateway, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // 1. Tilt on every card present now
    let cards: Vec<HtmlElement> = dom::collect_cards(&doc, &cfg.card_selector)?;
    let card_count = cards.len();
    let controller = Rc::new(TiltController::new(cards, TiltParams::from_config(cfg)));
    let tilt = dom::attach_tilt(controller);

    // 2. Status polling, only when the page has a status element
    let display = dom::find_status_element(&doc, &cfg.status_element_id).map(ElementDisplay::new);
    let poller = StatusPoller::activate(display, || FetchStatusSource::from_config(cfg)).map(Rc::new);
    let schedule = match &poller {
        Some(p) => Some(PollSchedule::start(p.clone(), cfg.poll_interval_ms)),
        None => {
            tracing::debug!(id = %cfg.status_element_id, "no status element; polling disabled");
            None
        }
    };

    tracing::info!(cards = card_count, polling = schedule.is_some(), "Venb Gateway initialized");
    Ok(Gateway {
        _tilt: tilt,
        card_count,
        poller,
        schedule,
    })
}
