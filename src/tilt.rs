//! Pointer-driven 3D tilt for landing page cards.
//!
//! The math lives here and is independent of the DOM: cards are reached through
//! the [`TiltSurface`] trait so the controller can be driven natively in tests.
//! The browser implementation for `HtmlElement` lives in `crate::dom`.

use crate::config::GatewayConfig;

/// Highlight colour blended into the card's glass background at the pointer.
pub const HIGHLIGHT_RGBA: &str = "rgba(255,255,255,0.08)";
/// CSS custom property provided by the page stylesheet.
pub const GLASS_BG_VAR: &str = "var(--glass-bg)";

// --- Geometry ----------------------------------------------------------------

/// Card bounding box in client (viewport) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a client-space point into box-local coordinates.
    pub fn local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }
}

/// Rotation pair derived from one pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    /// Rotation around the horizontal axis (CSS `rotateX`).
    pub rotate_x_deg: f64,
    /// Rotation around the vertical axis (CSS `rotateY`).
    pub rotate_y_deg: f64,
}

impl Tilt {
    /// Compute the tilt for a pointer at `(local_x, local_y)` inside a box of the
    /// given size. `span_deg` is the full rotation range, so each axis stays within
    /// `[-span/2, span/2]`. Returns `None` for boxes without area.
    pub fn from_pointer(
        local_x: f64,
        local_y: f64,
        width: f64,
        height: f64,
        span_deg: f64,
    ) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        let fx = (local_x / width).clamp(0.0, 1.0);
        let fy = (local_y / height).clamp(0.0, 1.0);
        Some(Self {
            rotate_x_deg: (0.5 - fy) * span_deg,
            rotate_y_deg: (fx - 0.5) * span_deg,
        })
    }
}

// --- Styles ------------------------------------------------------------------

/// Inline style values written onto a card. Empty strings mean "unset".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TiltStyle {
    pub transform: String,
    pub background: String,
}

impl TiltStyle {
    /// Style that reverts the card to its stylesheet appearance.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_cleared(&self) -> bool {
        self.transform.is_empty() && self.background.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltParams {
    pub perspective_px: f64,
    pub span_deg: f64,
    pub lift_px: f64,
}

impl Default for TiltParams {
    fn default() -> Self {
        Self::from_config(&GatewayConfig::default())
    }
}

impl TiltParams {
    pub fn from_config(cfg: &GatewayConfig) -> Self {
        Self {
            perspective_px: cfg.perspective_px,
            span_deg: cfg.max_tilt_deg,
            lift_px: cfg.lift_px,
        }
    }

    /// Transform order matters: perspective first, then both rotations, then the lift.
    pub fn transform_css(&self, tilt: Tilt) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY({}px)",
            self.perspective_px, tilt.rotate_x_deg, tilt.rotate_y_deg, -self.lift_px
        )
    }

    /// Radial highlight centred at the raw pointer position.
    pub fn background_css(&self, local_x: f64, local_y: f64) -> String {
        format!("radial-gradient(circle at {local_x}px {local_y}px, {HIGHLIGHT_RGBA}, {GLASS_BG_VAR})")
    }

    pub fn style_for(&self, local_x: f64, local_y: f64, tilt: Tilt) -> TiltStyle {
        TiltStyle {
            transform: self.transform_css(tilt),
            background: self.background_css(local_x, local_y),
        }
    }
}

// --- Controller --------------------------------------------------------------

/// An opaque card handle the controller can measure and restyle.
pub trait TiltSurface {
    fn bounds(&self) -> Rect;
    fn apply_style(&self, style: &TiltStyle);
}

/// Owns the set of cards found at start-up and reacts to pointer events on them.
pub struct TiltController<T> {
    cards: Vec<T>,
    params: TiltParams,
}

impl<T: TiltSurface> TiltController<T> {
    pub fn new(cards: Vec<T>, params: TiltParams) -> Self {
        Self { cards, params }
    }

    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Tilt card `index` towards a pointer at client coordinates. Returns the tilt
    /// that was applied, or `None` for an unknown index or a card without area.
    pub fn pointer_move(&self, index: usize, client_x: f64, client_y: f64) -> Option<Tilt> {
        let card = self.cards.get(index)?;
        let rect = card.bounds();
        let (x, y) = rect.local(client_x, client_y);
        let tilt = Tilt::from_pointer(x, y, rect.width, rect.height, self.params.span_deg)?;
        card.apply_style(&self.params.style_for(x, y, tilt));
        Some(tilt)
    }

    /// Clear inline transform and background on card `index`.
    pub fn pointer_leave(&self, index: usize) -> bool {
        match self.cards.get(index) {
            Some(card) => {
                card.apply_style(&TiltStyle::cleared());
                true
            }
            None => false,
        }
    }
}
