//! Runtime configuration for the gateway page script.
//!
//! Every field has a default matching the live landing page, so the host page
//! can call `start_gateway()` with no arguments or pass a partial JSON object to
//! `start_gateway_with_config` to override individual values.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "mc.venb.top";
pub const DEFAULT_API_BASE: &str = "https://api.mcsrvstat.us/3";
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 60_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_CARD_SELECTOR: &str = ".card";
pub const DEFAULT_STATUS_ELEMENT_ID: &str = "minecraft-status-text";

/// Errors produced while loading a [`GatewayConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Minecraft server address queried on the status API.
    pub server_address: String,
    /// Status API base url, without the trailing address segment.
    pub api_base: String,
    pub poll_interval_ms: u32,
    pub request_timeout_ms: u32,
    /// CSS selector matching tiltable cards.
    pub card_selector: String,
    /// Id of the element receiving the status label. Polling is skipped when absent.
    pub status_element_id: String,
    pub perspective_px: f64,
    /// Total rotation span across a card, in degrees (half on each side of centre).
    pub max_tilt_deg: f64,
    /// Upward lift applied while hovering, in pixels.
    pub lift_px: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            card_selector: DEFAULT_CARD_SELECTOR.to_string(),
            status_element_id: DEFAULT_STATUS_ELEMENT_ID.to_string(),
            perspective_px: 1000.0,
            max_tilt_deg: 10.0,
            lift_px: 5.0,
        }
    }
}

impl GatewayConfig {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GatewayConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_address.trim().is_empty() {
            return Err(invalid("server_address", "must not be empty"));
        }
        if self.api_base.trim().is_empty() {
            return Err(invalid("api_base", "must not be empty"));
        }
        if self.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "must be greater than zero"));
        }
        if self.request_timeout_ms == 0 {
            return Err(invalid("request_timeout_ms", "must be greater than zero"));
        }
        if self.card_selector.trim().is_empty() {
            return Err(invalid("card_selector", "must not be empty"));
        }
        if self.status_element_id.trim().is_empty() {
            return Err(invalid("status_element_id", "must not be empty"));
        }
        for (field, value) in [
            ("perspective_px", self.perspective_px),
            ("max_tilt_deg", self.max_tilt_deg),
            ("lift_px", self.lift_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("expected a finite non-negative number, got {value}")));
            }
        }
        Ok(())
    }

    /// Full status url, e.g. `https://api.mcsrvstat.us/3/mc.venb.top`.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            self.server_address.trim_start_matches('/')
        )
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
