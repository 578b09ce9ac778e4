use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement};

use super::dom::{self, PerformanceClock};
use crate::clock::{Debounce, FrameClock};
use crate::particles::{Simulation, Viewport, RESIZE_DEBOUNCE_MS};

const CANVAS: &str = "particles";
const LINK_WIDTH: f64 = 0.8;

fn window_viewport() -> Result<Viewport, JsValue> {
    let w = dom::window()?;
    let width = w.inner_width()?.as_f64().unwrap_or(0.0);
    let height = w.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height))
}

fn fit_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}

/// Clear the canvas and draw particles, then the links between them.
pub fn draw(ctx: &CanvasRenderingContext2d, sim: &Simulation) {
    let vp = sim.viewport();
    ctx.clear_rect(0.0, 0.0, vp.width, vp.height);

    for p in sim.particles() {
        ctx.begin_path();
        ctx.arc(p.x, p.y, p.radius, 0.0, std::f64::consts::TAU).ok();
        ctx.set_fill_style_str(&format!("rgba(255,255,255,{})", p.alpha));
        ctx.fill();
    }

    ctx.set_line_width(LINK_WIDTH);
    for link in sim.links() {
        ctx.set_stroke_style_str(&format!("rgba(255,255,255,{})", link.alpha));
        ctx.begin_path();
        ctx.move_to(link.from.0, link.from.1);
        ctx.line_to(link.to.0, link.to.1);
        ctx.stroke();
    }
}

/// Start the particle background on `#particles`. Runs for the lifetime of
/// the page.
pub fn start(doc: &web_sys::Document) -> Result<(), JsValue> {
    let Some(canvas) = dom::by_id::<HtmlCanvasElement>(doc, CANVAS) else {
        log::debug!("particles: no canvas, skipping");
        return Ok(());
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d canvas not supported")?
        .dyn_into()?;

    let viewport = window_viewport()?;
    fit_canvas(&canvas, viewport);
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let sim = Simulation::new(viewport, seed);
    log::debug!("particles: {} in {}x{}", sim.particles().len(), viewport.width, viewport.height);

    let clock = Rc::new(PerformanceClock::new());
    let debounce = Rc::new(RefCell::new(Debounce::new(RESIZE_DEBOUNCE_MS)));

    // Resize only marks the debounce; the frame loop applies it.
    {
        let clock = clock.clone();
        let debounce = debounce.clone();
        dom::listen(&dom::window()?, "resize", move |_: Event| {
            debounce.borrow_mut().trigger(clock.now_ms());
        })?;
    }

    let mut sim = sim;
    dom::run_every_frame(move |now| {
        if debounce.borrow_mut().poll(now.max(clock.now_ms())) {
            match window_viewport() {
                Ok(viewport) => {
                    fit_canvas(&canvas, viewport);
                    sim.resize(viewport);
                }
                Err(err) => log::warn!("particles: resize skipped: {err:?}"),
            }
        }
        sim.step();
        draw(&ctx, &sim);
        true
    })
}
