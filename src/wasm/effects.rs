//! Pointer-reactive cosmetics. Each effect installs independently and stays
//! inert when its markup is missing.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::dom;
use crate::pointer::{
    card_glow, parallax_offset, parse_depth, trailer_transform, TrailerKind, TRAILER_ANIMATION_MS,
};

const TRAILER: &str = "trailer";
const TRAILER_ICON: &str = "trailer-icon";
const INTERACTABLE: &str = ".interactable";

const CARDS_CONTAINER: &str = "cards";
const GLOW_CARDS: &str = ".card";

const PARALLAX_CONTAINER: &str = "profile-parallax";
const FLOATING_ITEMS: &str = ".floating-item";

pub fn install(doc: &Document) -> Result<(), JsValue> {
    install_trailer(doc)?;
    install_card_glow(doc)?;
    install_parallax(doc)
}

fn pointer(ev: &MouseEvent) -> (f64, f64) {
    (ev.client_x() as f64, ev.client_y() as f64)
}

fn animate_trailer(trailer: &HtmlElement, transform: &str) -> Result<(), JsValue> {
    let keyframes = Object::new();
    Reflect::set(&keyframes, &"transform".into(), &transform.into())?;
    let options = Object::new();
    Reflect::set(&options, &"duration".into(), &TRAILER_ANIMATION_MS.into())?;
    Reflect::set(&options, &"fill".into(), &"forwards".into())?;
    // Element.animate is only bound behind web-sys unstable APIs; call it
    // through the prototype instead.
    let animate: Function = Reflect::get(trailer, &"animate".into())?.dyn_into()?;
    animate.call2(trailer, &keyframes, &options)?;
    Ok(())
}

fn install_trailer(doc: &Document) -> Result<(), JsValue> {
    let Some(trailer) = dom::by_id::<HtmlElement>(doc, TRAILER) else {
        log::debug!("trailer: missing, skipping");
        return Ok(());
    };
    let icon = dom::by_id::<Element>(doc, TRAILER_ICON);

    dom::listen(&dom::window()?, "mousemove", move |ev: MouseEvent| {
        let interactable = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(INTERACTABLE).ok().flatten());

        let size = (trailer.offset_width() as f64, trailer.offset_height() as f64);
        let transform = trailer_transform(pointer(&ev), size, interactable.is_some());
        if let Err(err) = animate_trailer(&trailer, &transform) {
            log::debug!("trailer: {err:?}");
        }

        let raw_type = interactable.as_ref().and_then(|el| el.get_attribute("data-type"));
        trailer
            .set_attribute("data-type", raw_type.as_deref().unwrap_or(""))
            .ok();
        if interactable.is_some() {
            if let Some(icon) = &icon {
                icon.set_class_name(TrailerKind::from_attr(raw_type.as_deref()).icon_class());
            }
        }
    })
}

fn install_card_glow(doc: &Document) -> Result<(), JsValue> {
    let Some(container) = dom::by_id::<Element>(doc, CARDS_CONTAINER) else {
        log::debug!("card glow: no container, skipping");
        return Ok(());
    };
    let cards: Vec<HtmlElement> = dom::query_all_doc(doc, GLOW_CARDS);
    if cards.is_empty() {
        return Ok(());
    }

    {
        let cards = cards.clone();
        dom::listen(&container, "mousemove", move |ev: MouseEvent| {
            let at = pointer(&ev);
            for card in &cards {
                let glow = card_glow(dom::rect_of(card), at);
                dom::set_style(card, "--mouse-x", &format!("{}px", glow.local.0));
                dom::set_style(card, "--mouse-y", &format!("{}px", glow.local.1));
                dom::set_style(card, "--inner-glow", &glow.inner.to_string());
                dom::set_style(card, "--border-glow", &format!("{:.2}", glow.border));
            }
        })?;
    }

    dom::listen(&container, "mouseleave", move |_: MouseEvent| {
        for card in &cards {
            dom::set_style(card, "--inner-glow", "0");
            dom::set_style(card, "--border-glow", "0");
        }
    })
}

fn install_parallax(doc: &Document) -> Result<(), JsValue> {
    let Some(container) = dom::by_id::<Element>(doc, PARALLAX_CONTAINER) else {
        log::debug!("parallax: no container, skipping");
        return Ok(());
    };
    let items: Vec<HtmlElement> = dom::query_all(&container, FLOATING_ITEMS);
    if items.is_empty() {
        return Ok(());
    }
    let window = dom::window()?;

    {
        let items = items.clone();
        dom::listen(&window, "mousemove", move |ev: MouseEvent| {
            let bounds = dom::rect_of(&container);
            let at = pointer(&ev);
            for item in &items {
                let depth = parse_depth(item.get_attribute("data-depth").as_deref());
                let (x, y) = parallax_offset(bounds, at, depth);
                dom::set_style(item, "--px", &format!("{x}px"));
                dom::set_style(item, "--py", &format!("{y}px"));
            }
        })?;
    }

    // `mouseleave` on the document element fires when the pointer exits the
    // window.
    let root = doc.document_element().ok_or("no document element")?;
    dom::listen(&root, "mouseleave", move |_: MouseEvent| {
        for item in &items {
            dom::set_style(item, "--px", "0px");
            dom::set_style(item, "--py", "0px");
        }
    })
}
