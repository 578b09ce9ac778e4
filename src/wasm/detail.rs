//! Project detail page: load one record by `?id=`, render it, wire the
//! neighbor links and the image zoom overlay.

use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement, KeyboardEvent,
    MouseEvent, UrlSearchParams,
};

use super::dom;
use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::project::{require_id, resolve_page, InfoRow, NavLink, ProjectPage, REPOSITORY_LABEL};

/// Time the transition panel gets to cover the page before navigating.
pub const NAVIGATION_DELAY_MS: u32 = 600;

const PAGE: &str = "page";
const TRANSITION_PANEL: &str = "page-transition";
const IMAGE_SLOTS: [&str; 3] = ["image-main", "image-side-1", "image-side-2"];
const BRIEF: &str = "brief";
const INFO: &str = "info";
const PREV: &str = "prev";
const NEXT: &str = "next";
const OVERLAY: &str = "image-overlay";
const OVERLAY_IMAGE: &str = "overlay-img";

const ROW_CLASS: &str = "flex justify-between gap-6 border-b border-zinc-800 pb-2";
const LABEL_CLASS: &str = "text-zinc-400 font-semibold";
const LINK_CLASS: &str = "underline hover:text-zinc-300";

const NOT_FOUND_MARKUP: &str = r#"
    <div class="min-h-screen flex items-center justify-center bg-black text-white">
      <div class="text-center">
        <h1 class="text-6xl font-bold mb-4">404</h1>
        <p class="text-zinc-400 mb-6">Project not found</p>
        <a href="{listing}" class="underline">Back to projects</a>
      </div>
    </div>
"#;

/// Start loading the requested project. Pages without the info table are
/// not detail pages and are left alone.
pub fn install(doc: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    if doc.get_element_by_id(INFO).is_none() {
        log::debug!("detail: not a project page, skipping");
        return Ok(());
    }

    let search = dom::window()?.location().search()?;
    let raw_id = UrlSearchParams::new_with_str(&search)?.get("id");
    let id = match require_id(raw_id) {
        Ok(id) => id,
        Err(err) => {
            log::warn!("detail: {err}");
            return render_not_found(doc, config);
        }
    };

    install_zoom(doc)?;

    let doc = doc.clone();
    let config = config.clone();
    spawn_local(async move {
        let fetched = fetch_text(&config.data_url).await;
        let rendered = match resolve_page(Some(id), fetched, &config) {
            Ok(page) => render(&doc, &page),
            Err(err) => {
                log::warn!("detail: {err}");
                render_not_found(&doc, &config)
            }
        };
        if let Err(err) = rendered {
            log::error!("detail: render failed: {err:?}");
        }
    });
    Ok(())
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;
    if !resp.ok() {
        return Err(LoadError::Status(resp.status()));
    }
    resp.text().await.map_err(|e| LoadError::Fetch(e.to_string()))
}

/// Fill the page from a resolved record.
pub fn render(doc: &Document, page: &ProjectPage) -> Result<(), JsValue> {
    doc.set_title(&page.title);

    if let Some(images) = &page.images {
        for (slot, src) in IMAGE_SLOTS.iter().zip(images) {
            if let Some(img) = dom::by_id::<HtmlImageElement>(doc, slot) {
                img.set_src(src);
                img.set_alt(&page.name);
            }
        }
    }

    if let Some(brief) = doc.get_element_by_id(BRIEF) {
        brief.set_inner_html("");
        for text in &page.brief {
            let p = doc.create_element("p")?;
            p.set_text_content(Some(text));
            brief.append_child(&p)?;
        }
    }

    if let Some(info) = doc.get_element_by_id(INFO) {
        info.set_inner_html("");
        for row in &page.rows {
            info.append_child(&info_row(doc, row)?)?;
        }
    }

    if let Some(prev) = &page.prev {
        wire_neighbor(doc, PREV, prev, true)?;
    }
    if let Some(next) = &page.next {
        wire_neighbor(doc, NEXT, next, false)?;
    }

    if let Some(page_el) = dom::by_id::<Element>(doc, PAGE) {
        dom::next_frame(move || dom::swap_classes(&page_el, &[], &["opacity-0", "translate-y-6"]))?;
    }
    Ok(())
}

fn info_row(doc: &Document, row: &InfoRow) -> Result<Element, JsValue> {
    let wrapper = doc.create_element("div")?;
    wrapper.set_class_name(ROW_CLASS);

    let dt = doc.create_element("dt")?;
    dt.set_class_name(LABEL_CLASS);
    dt.set_text_content(Some(row.label()));

    let dd = doc.create_element("dd")?;
    match row {
        InfoRow::Website { value, href, .. } => {
            dd.set_class_name("text-right");
            dd.append_child(&external_link(doc, href, value)?)?;
        }
        InfoRow::Repository { href, .. } => {
            dd.set_class_name("text-right");
            dd.append_child(&external_link(doc, href, REPOSITORY_LABEL)?)?;
        }
        InfoRow::Plain { value, .. } => {
            dd.set_class_name("text-white text-right");
            dd.set_text_content(Some(value));
        }
    }

    wrapper.append_child(&dt)?;
    wrapper.append_child(&dd)?;
    Ok(wrapper)
}

fn external_link(doc: &Document, href: &str, text: &str) -> Result<Element, JsValue> {
    let a = doc.create_element("a")?;
    a.set_attribute("href", href)?;
    a.set_attribute("target", "_blank")?;
    a.set_attribute("rel", "noopener")?;
    a.set_class_name(LINK_CLASS);
    a.set_text_content(Some(text));
    Ok(a)
}

fn wire_neighbor(doc: &Document, id: &str, nav: &NavLink, leading_icon: bool) -> Result<(), JsValue> {
    let Some(link) = dom::by_id::<HtmlAnchorElement>(doc, id) else {
        return Ok(());
    };
    link.set_href(&nav.href);
    link.set_inner_html("");

    let icon = doc.create_element("i")?;
    if leading_icon {
        icon.set_class_name("fa-solid fa-angle-left");
        link.append_child(&icon)?;
        link.append_with_str_1(&format!(" {}", nav.name))?;
    } else {
        icon.set_class_name("fa-solid fa-angle-right");
        link.append_with_str_1(&format!("{} ", nav.name))?;
        link.append_child(&icon)?;
    }

    wire_transition(doc, &link)
}

/// Play the transition panel, then follow the link once it has covered the
/// page.
fn wire_transition(doc: &Document, link: &HtmlAnchorElement) -> Result<(), JsValue> {
    let panel = dom::by_id::<Element>(doc, TRANSITION_PANEL);
    let target = link.clone();
    dom::listen(link, "click", move |ev: MouseEvent| {
        ev.prevent_default();
        if let Some(panel) = &panel {
            dom::swap_classes(panel, &[], &["translate-x-full"]);
        }
        let href = target.href();
        dom::after(NAVIGATION_DELAY_MS, move || {
            let navigated = dom::window().and_then(|w| w.location().set_href(&href));
            if let Err(err) = navigated {
                log::error!("detail: navigation failed: {err:?}");
            }
        });
    })
}

/// Replace the whole body with the not-found message. One way; nothing on
/// the page survives.
pub fn render_not_found(doc: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    let body = doc.body().ok_or("no body")?;
    body.set_inner_html(&NOT_FOUND_MARKUP.replace("{listing}", &config.listing_page));
    Ok(())
}

fn open_overlay(overlay: &HtmlElement, full: &HtmlImageElement, src: &str) {
    dom::swap_classes(overlay, &["flex"], &["hidden"]);
    full.set_src(src);
    let full = full.clone();
    let animated = dom::next_frame(move || {
        dom::swap_classes(&full, &["scale-100", "opacity-100"], &["scale-75", "opacity-0"]);
    });
    if let Err(err) = animated {
        log::error!("zoom: {err:?}");
    }
}

fn close_overlay(overlay: &HtmlElement, full: &HtmlImageElement) {
    dom::swap_classes(full, &["scale-75", "opacity-0"], &["scale-100", "opacity-100"]);
    dom::swap_classes(overlay, &["hidden"], &["flex"]);
}

/// Image zoom: clicking a slot opens the overlay, clicking the overlay or
/// pressing Escape while it is open closes it.
pub fn install_zoom(doc: &Document) -> Result<(), JsValue> {
    let (Some(overlay), Some(full)) = (
        dom::by_id::<HtmlElement>(doc, OVERLAY),
        dom::by_id::<HtmlImageElement>(doc, OVERLAY_IMAGE),
    ) else {
        log::debug!("zoom: no overlay, skipping");
        return Ok(());
    };

    for slot in IMAGE_SLOTS {
        let Some(img) = dom::by_id::<HtmlImageElement>(doc, slot) else {
            continue;
        };
        img.class_list().add_1("cursor-zoom-in")?;
        let (overlay, full, source) = (overlay.clone(), full.clone(), img.clone());
        dom::listen(&img, "click", move |_: MouseEvent| {
            open_overlay(&overlay, &full, &source.src());
        })?;
    }

    {
        let (overlay_ref, full) = (overlay.clone(), full.clone());
        dom::listen(&overlay, "click", move |_: MouseEvent| {
            close_overlay(&overlay_ref, &full);
        })?;
    }

    dom::listen(doc, "keydown", move |ev: KeyboardEvent| {
        if ev.key() == "Escape" && !overlay.class_list().contains("hidden") {
            close_overlay(&overlay, &full);
        }
    })
}
