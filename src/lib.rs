#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod particles;
pub mod pointer;
pub mod project;
pub mod scroll;

// Only compile browser glue when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use js_sys::Reflect;
    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use crate::config::{SiteConfig, GLOBAL_OVERRIDE};

    pub mod chrome;
    pub mod detail;
    pub mod dom;
    pub mod effects;
    pub mod filter_ui;
    pub mod render;

    /// Defaults, overridden by `window.__PORTFOLIO_CONFIG` when present.
    pub fn site_config() -> Result<SiteConfig, serde_json::Error> {
        let raw = web_sys::window()
            .and_then(|w| Reflect::get(&w, &GLOBAL_OVERRIDE.into()).ok())
            .filter(|v| v.is_object())
            .and_then(|v| js_sys::JSON::stringify(&v).ok())
            .and_then(|s| s.as_string());
        match raw {
            Some(text) => SiteConfig::from_json(&text),
            None => Ok(SiteConfig::default()),
        }
    }

    fn guarded(name: &str, doc: &Document, install: impl FnOnce(&Document) -> Result<(), JsValue>) {
        if let Err(err) = install(doc) {
            log::error!("{name} failed to start: {err:?}");
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let config = site_config();
        let level = config.as_ref().map_or(log::Level::Info, SiteConfig::log_level);
        console_log::init_with_level(level)
            .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;
        let config = config.unwrap_or_else(|err| {
            log::warn!("ignoring {GLOBAL_OVERRIDE}: {err}");
            SiteConfig::default()
        });

        let document = dom::document()?;
        guarded("particles", &document, render::start);
        guarded("filter", &document, filter_ui::install);
        guarded("detail", &document, |doc| detail::install(doc, &config));
        guarded("effects", &document, effects::install);
        guarded("chrome", &document, chrome::install);
        Ok(())
    }
}
