#![cfg(target_arch = "wasm32")]

use portfolio_fx::config::SiteConfig;
use portfolio_fx::project::{resolve_page, ProjectCatalog};
use portfolio_fx::wasm::detail;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const DATA: &str = r#"[
    { "id": "first", "images": ["1.jpg", "2.jpg", "3.jpg"], "brief": [],
      "info": { "Project Name": "First" } },
    { "id": "foo", "images": ["a.jpg", "b.jpg", "c.jpg"],
      "brief": ["One.", "Two."],
      "info": { "Project Name": "Foo", "Website": "example.com",
                "GitHub": "https://github.com/x/foo", "Client": "", "Year": "2024" } },
    { "id": "solo", "images": ["only.jpg"], "brief": ["Short."],
      "info": { "Project Name": "Solo" } }
]"#;

const PAGE: &str = r#"
    <div id="page" class="opacity-0 translate-y-6">
      <img id="image-main" src="placeholder.png"><img id="image-side-1"><img id="image-side-2">
      <div id="brief"></div>
      <dl id="info"></dl>
      <a id="prev"></a><a id="next"></a>
    </div>
"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount() -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(PAGE);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn img(doc: &Document, id: &str) -> HtmlImageElement {
    doc.get_element_by_id(id).unwrap().dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn renders_full_record() {
    let root = mount();
    let doc = document();
    let cfg = SiteConfig::default();
    let page = resolve_page(Some("foo".into()), Ok(DATA.into()), &cfg).unwrap();
    detail::render(&doc, &page).unwrap();

    assert_eq!(doc.title(), "Foo | Jun");
    for (id, file) in [("image-main", "/a.jpg"), ("image-side-1", "/b.jpg"), ("image-side-2", "/c.jpg")] {
        let el = img(&doc, id);
        assert!(el.src().ends_with(file), "{id}: {}", el.src());
        assert_eq!(el.alt(), "Foo");
    }

    let brief = doc.get_element_by_id("brief").unwrap();
    assert_eq!(brief.child_element_count(), 2);
    assert_eq!(brief.first_element_child().unwrap().text_content().unwrap(), "One.");

    let info = doc.get_element_by_id("info").unwrap();
    // "Client" is empty and omitted
    assert_eq!(info.child_element_count(), 4);
    let website = info.query_selector("a[href='https://example.com']").unwrap().unwrap();
    assert_eq!(website.text_content().unwrap(), "example.com");
    let repo = info
        .query_selector("a[href='https://github.com/x/foo']")
        .unwrap()
        .unwrap();
    assert_eq!(repo.text_content().unwrap(), "View Repository");

    let prev = doc.get_element_by_id("prev").unwrap();
    assert_eq!(prev.get_attribute("href").unwrap(), "project.html?id=first");
    assert!(prev.text_content().unwrap().contains("First"));
    let next = doc.get_element_by_id("next").unwrap();
    assert_eq!(next.get_attribute("href").unwrap(), "project.html?id=solo");

    root.remove();
}

#[wasm_bindgen_test]
fn short_image_list_leaves_slots_alone() {
    let root = mount();
    let doc = document();
    let catalog = ProjectCatalog::from_json(DATA).unwrap();
    let page = catalog.page("solo", &SiteConfig::default()).unwrap();
    detail::render(&doc, &page).unwrap();

    assert!(img(&doc, "image-main").src().ends_with("/placeholder.png"));
    assert_eq!(img(&doc, "image-side-1").alt(), "");
    // last record: no next link
    assert!(doc.get_element_by_id("next").unwrap().get_attribute("href").is_none());
    root.remove();
}

#[wasm_bindgen_test]
fn not_found_replaces_body() {
    // Render into a detached document so the live body keeps its content.
    let scratch = document()
        .implementation()
        .unwrap()
        .create_html_document_with_title("")
        .unwrap();
    let body = scratch.body().unwrap();
    body.set_inner_html(PAGE);
    let cfg = SiteConfig::default();
    assert!(resolve_page(Some("missing".into()), Ok(DATA.into()), &cfg).is_err());

    detail::render_not_found(&scratch, &cfg).unwrap();
    assert!(scratch.get_element_by_id("info").is_none());
    assert!(body.text_content().unwrap().contains("Project not found"));
    let back = body.query_selector("a").unwrap().unwrap();
    assert_eq!(back.get_attribute("href").unwrap(), "project_list.html");
}

const ZOOM: &str = r#"
    <img id="image-main" src="shot.png">
    <div id="image-overlay" class="hidden">
      <img id="overlay-img" class="scale-75 opacity-0">
    </div>
"#;

fn press_escape(doc: &Document) {
    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let ev = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    doc.dispatch_event(&ev).unwrap();
}

#[wasm_bindgen_test]
fn zoom_overlay_opens_and_closes() {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(ZOOM);
    doc.body().unwrap().append_child(&root).unwrap();
    detail::install_zoom(&doc).unwrap();

    let overlay: HtmlElement = doc.get_element_by_id("image-overlay").unwrap().dyn_into().unwrap();
    let shot: HtmlElement = doc.get_element_by_id("image-main").unwrap().dyn_into().unwrap();
    let full = img(&doc, "overlay-img");

    shot.click();
    assert!(overlay.class_list().contains("flex"));
    assert!(!overlay.class_list().contains("hidden"));
    assert!(full.src().ends_with("/shot.png"));

    overlay.click();
    assert!(overlay.class_list().contains("hidden"));
    assert!(full.class_list().contains("opacity-0"));

    shot.click();
    press_escape(&doc);
    assert!(overlay.class_list().contains("hidden"));
    assert!(!overlay.class_list().contains("flex"));

    // already closed: Escape changes nothing
    press_escape(&doc);
    assert!(overlay.class_list().contains("hidden"));

    root.remove();
}
