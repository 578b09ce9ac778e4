use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::dom;
use crate::filter::{CardSet, FadeTracker, FilterKey, FADE_DURATION_MS};

const CONTROLS: &str = "#project-filters li";
const GRID: &str = ".grid";
const CARDS: &str = ".project-card";

const ACTIVE: &[&str] = &["border-b-2", "border-white", "text-white"];
const INACTIVE: &[&str] = &["text-zinc-400"];
const CARD_VISIBLE: &[&str] = &["opacity-100", "scale-100"];
const CARD_FADED: &[&str] = &["opacity-0", "scale-[0.97]"];

pub struct FilterController {
    grid: Element,
    cards: CardSet<HtmlElement>,
    fades: FadeTracker,
}

type Shared = Rc<RefCell<FilterController>>;

impl FilterController {
    /// `None` when the page has no filter controls, grid or cards.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let grid: Element = dom::query(doc, GRID)?;
        let cards: Vec<HtmlElement> = dom::query_all_doc(doc, CARDS);
        if cards.is_empty() {
            return None;
        }
        let cards = CardSet::new(cards.into_iter().map(|card| {
            let raw = card.get_attribute("data-category").unwrap_or_default();
            (card, raw)
        }));
        let fades = FadeTracker::new(cards.len());
        Some(Self { grid, cards, fades })
    }

    pub fn cards(&self) -> &CardSet<HtmlElement> {
        &self.cards
    }

    /// Index of a card in original order.
    fn index_of(&self, card: &HtmlElement) -> Option<usize> {
        self.cards.cards().position(|c| c == card)
    }
}

/// Reorder the grid and start the fade transitions for `key`.
pub fn apply(ctrl: &Shared, key: &FilterKey) -> Result<(), JsValue> {
    let (matched, unmatched) = {
        let c = ctrl.borrow();
        let partition = c.cards.partition(key);
        for card in partition.display_order() {
            c.grid.append_child(card)?;
        }
        let matched: Vec<HtmlElement> = partition.matched.into_iter().cloned().collect();
        let unmatched: Vec<HtmlElement> = partition.unmatched.into_iter().cloned().collect();
        (matched, unmatched)
    };

    for card in matched {
        show(ctrl, card)?;
    }
    for card in unmatched {
        hide(ctrl, card);
    }
    Ok(())
}

fn show(ctrl: &Shared, card: HtmlElement) -> Result<(), JsValue> {
    {
        let mut c = ctrl.borrow_mut();
        if let Some(idx) = c.index_of(&card) {
            c.fades.show(idx);
        }
    }
    let style = card.style();
    style.set_property("display", "block")?;
    style.remove_property("pointer-events")?;
    dom::next_frame(move || dom::swap_classes(&card, CARD_VISIBLE, CARD_FADED))
}

fn hide(ctrl: &Shared, card: HtmlElement) {
    dom::swap_classes(&card, CARD_FADED, CARD_VISIBLE);
    dom::set_style(&card, "pointer-events", "none");

    let token = {
        let mut c = ctrl.borrow_mut();
        c.index_of(&card).and_then(|idx| c.fades.begin_hide(idx).map(|t| (idx, t)))
    };
    let Some((idx, token)) = token else {
        return;
    };
    let ctrl = ctrl.clone();
    dom::after(FADE_DURATION_MS, move || {
        if ctrl.borrow_mut().fades.finish_hide(idx, token) {
            dom::set_style(&card, "display", "none");
        }
    });
}

fn activate(controls: &[HtmlElement], active: &HtmlElement) {
    for control in controls {
        dom::swap_classes(control, INACTIVE, ACTIVE);
    }
    dom::swap_classes(active, ACTIVE, INACTIVE);
}

/// Wire the filter controls. Inert when the page lacks the grid markup.
pub fn install(doc: &Document) -> Result<(), JsValue> {
    let controls: Vec<HtmlElement> = dom::query_all_doc(doc, CONTROLS);
    if controls.is_empty() {
        log::debug!("filter: no controls, skipping");
        return Ok(());
    }
    let Some(ctrl) = FilterController::from_document(doc) else {
        log::debug!("filter: no grid or cards, skipping");
        return Ok(());
    };
    let ctrl: Shared = Rc::new(RefCell::new(ctrl));

    for control in &controls {
        let key = FilterKey::from(control.get_attribute("data-filter").unwrap_or_default().as_str());
        let ctrl = ctrl.clone();
        let controls = controls.clone();
        let this = control.clone();
        dom::listen(control, "click", move |_: MouseEvent| {
            activate(&controls, &this);
            if let Err(err) = apply(&ctrl, &key) {
                log::error!("filter: {err:?}");
            }
        })?;
    }

    log::debug!("filter: {} cards", ctrl.borrow().cards().len());
    apply(&ctrl, &FilterKey::All)
}
