//! Thin helpers over `web_sys` shared by the page behaviors.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::clock::FrameClock;
use crate::pointer::Rect;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| "no window".into())
}

pub fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| "no document".into())
}

/// Element by id, cast to `T`. `None` if absent or of another type.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(root: &Document, selector: &str) -> Option<T> {
    root.query_selector(selector).ok()??.dyn_into::<T>().ok()
}

/// All matches of `selector` under `root` that are `T`, in document order.
pub fn query_all<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Same as [`query_all`] but rooted at the document.
pub fn query_all_doc<T: JsCast>(doc: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Swap one set of classes for another.
pub fn swap_classes(el: &Element, add: &[&str], remove: &[&str]) {
    let list = el.class_list();
    for class in remove {
        list.remove_1(class).ok();
    }
    for class in add {
        list.add_1(class).ok();
    }
}

pub fn set_style(el: &HtmlElement, name: &str, value: &str) {
    el.style().set_property(name, value).ok();
}

pub fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` once after `ms` milliseconds.
pub fn after(ms: u32, f: impl FnOnce() + 'static) {
    Timeout::new(ms, f).forget();
}

pub fn next_frame(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let closure = Closure::once_into_js(f);
    window()?.request_animation_frame(closure.unchecked_ref())?;
    Ok(())
}

/// Call `tick` with each animation-frame timestamp until it returns false.
pub fn run_every_frame(tick: impl FnMut(f64) -> bool + 'static) -> Result<(), JsValue> {
    // `f` holds the frame closure so it can re-request itself. Storing it in
    // an `Option` lets us create the `Closure` first and reference it from
    // within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut tick = tick;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        if !tick(now) {
            // not rescheduled; the loop ends here
            return;
        }
        let scheduled = f
            .borrow()
            .as_ref()
            .map(|cb| window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref())));
        if let Some(Err(err)) = scheduled {
            log::error!("animation frame request failed: {err:?}");
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = g.borrow().as_ref() {
        window()?.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// `performance.now()`, on the animation-frame timebase.
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl FrameClock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }
}
