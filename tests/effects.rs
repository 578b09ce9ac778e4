#![cfg(target_arch = "wasm32")]

use portfolio_fx::wasm::effects;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn by_id(doc: &Document, id: &str) -> HtmlElement {
    doc.get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn mouse(target: &EventTarget, kind: &str, x: i32, y: i32) {
    let init = MouseEventInit::new();
    init.set_client_x(x);
    init.set_client_y(y);
    let ev = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&ev).unwrap();
}

fn var(el: &HtmlElement, name: &str) -> String {
    el.style().get_property_value(name).unwrap().trim().to_string()
}

const CARDS: &str = r#"
    <div id="cards">
      <div id="glow-card" class="card"
           style="position: fixed; left: 0; top: 0; width: 100px; height: 100px"></div>
    </div>
"#;

#[wasm_bindgen_test]
fn card_glow_follows_pointer_and_resets_on_leave() {
    let root = mount(CARDS);
    let doc = document();
    effects::install(&doc).unwrap();

    let container = by_id(&doc, "cards");
    let card = by_id(&doc, "glow-card");
    mouse(&container, "mousemove", 50, 40);
    assert_eq!(var(&card, "--mouse-x"), "50px");
    assert_eq!(var(&card, "--mouse-y"), "40px");
    assert_eq!(var(&card, "--inner-glow"), "1");
    assert_eq!(var(&card, "--border-glow"), "1.00");

    mouse(&container, "mouseleave", 0, 0);
    assert_eq!(var(&card, "--inner-glow"), "0");
    assert_eq!(var(&card, "--border-glow"), "0");

    root.remove();
}

const PARALLAX: &str = r#"
    <div id="profile-parallax"
         style="position: fixed; left: 0; top: 0; width: 200px; height: 200px">
      <span id="float-a" class="floating-item" data-depth="10"></span>
      <span id="float-b" class="floating-item" data-depth="0"></span>
    </div>
"#;

#[wasm_bindgen_test]
fn parallax_moves_against_pointer_and_resets_on_window_leave() {
    let root = mount(PARALLAX);
    let doc = document();
    effects::install(&doc).unwrap();

    let window = web_sys::window().unwrap();
    let near = by_id(&doc, "float-a");
    let fallback = by_id(&doc, "float-b");
    mouse(&window, "mousemove", 0, 0);
    assert_eq!(var(&near, "--px"), "5px");
    assert_eq!(var(&near, "--py"), "5px");
    // depth 0 falls back to the default depth
    assert_eq!(var(&fallback, "--px"), "5px");

    mouse(&doc.document_element().unwrap(), "mouseleave", 0, 0);
    assert_eq!(var(&near, "--px"), "0px");
    assert_eq!(var(&fallback, "--py"), "0px");

    root.remove();
}
