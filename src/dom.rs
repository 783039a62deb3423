// DOM bindings: card discovery, tilt listeners and the status element lookup.

use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent};

use crate::tilt::{Rect, TiltController, TiltStyle, TiltSurface};

impl TiltSurface for HtmlElement {
    fn bounds(&self) -> Rect {
        let r = self.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn apply_style(&self, style: &TiltStyle) {
        let css = self.style();
        // Empty values remove the inline declaration.
        css.set_property("transform", &style.transform).ok();
        css.set_property("background", &style.background).ok();
    }
}

/// All elements matching `selector` at call time. Non-HTML matches (e.g. SVG) are skipped.
pub fn collect_cards(doc: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = doc.query_selector_all(selector)?;
    let mut cards = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(card) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            cards.push(card);
        }
    }
    Ok(cards)
}

pub fn find_status_element(doc: &Document, id: &str) -> Option<Element> {
    doc.get_element_by_id(id)
}

/// Registered `mousemove` / `mouseleave` listeners; dropping removes them.
pub type TiltListeners = Vec<EventListener>;

pub fn attach_tilt(controller: Rc<TiltController<HtmlElement>>) -> TiltListeners {
    let mut listeners = Vec::with_capacity(controller.len() * 2);
    for (index, card) in controller.cards().iter().enumerate() {
        // Mouse move: tilt towards the pointer
        {
            let ctl = controller.clone();
            listeners.push(EventListener::new(card, "mousemove", move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                ctl.pointer_move(index, event.client_x() as f64, event.client_y() as f64);
            }));
        }
        // Mouse leave: back to stylesheet appearance
        {
            let ctl = controller.clone();
            listeners.push(EventListener::new(card, "mouseleave", move |_event: &Event| {
                ctl.pointer_leave(index);
            }));
        }
    }
    listeners
}
