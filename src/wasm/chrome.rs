//! Page furniture: the back-to-top control and the footer year.

use wasm_bindgen::JsValue;
use web_sys::{Document, Event, HtmlElement, MouseEvent};

use super::dom::{self, PerformanceClock};
use crate::clock::FrameClock;
use crate::scroll::{back_to_top_visible, ScrollAnimation};

const BACK_TO_TOP: &str = "back-to-top";
const YEAR: &str = "year";

pub fn install(doc: &Document) -> Result<(), JsValue> {
    if let Some(year) = doc.get_element_by_id(YEAR) {
        let now = js_sys::Date::new_0();
        year.set_text_content(Some(&now.get_full_year().to_string()));
    }
    install_back_to_top(doc)
}

/// Scroll to the top over the standard duration. Every call starts its own
/// run from the current position; earlier runs are not cancelled.
pub fn smooth_scroll_to_top() -> Result<(), JsValue> {
    let window = dom::window()?;
    let anim = ScrollAnimation::new(window.scroll_y()?, PerformanceClock::new().now_ms());
    dom::run_every_frame(move |now| {
        let frame = anim.frame(now);
        window.scroll_to_with_x_and_y(0.0, frame.y);
        !frame.finished
    })
}

fn install_back_to_top(doc: &Document) -> Result<(), JsValue> {
    let Some(button) = dom::by_id::<HtmlElement>(doc, BACK_TO_TOP) else {
        log::debug!("back-to-top: missing, skipping");
        return Ok(());
    };
    let window = dom::window()?;

    {
        let button = button.clone();
        let doc = doc.clone();
        let win = window.clone();
        dom::listen(&window, "scroll", move |_: Event| {
            let scroll_top = win.scroll_y().unwrap_or(0.0);
            let viewport = win
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            let document_height = doc
                .document_element()
                .map(|el| el.scroll_height() as f64)
                .unwrap_or(0.0);
            if back_to_top_visible(scroll_top, viewport, document_height) {
                dom::swap_classes(&button, &["flex"], &["hidden"]);
            } else {
                dom::swap_classes(&button, &["hidden"], &["flex"]);
            }
        })?;
    }

    dom::listen(&button, "click", move |_: MouseEvent| {
        if let Err(err) = smooth_scroll_to_top() {
            log::error!("back-to-top: {err:?}");
        }
    })
}
