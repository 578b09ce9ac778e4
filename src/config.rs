//! Deploy-level settings for the site glue.
//!
//! Defaults match the bundled `static/` pages. A host page can override any
//! field by defining `window.__PORTFOLIO_CONFIG` before the module loads.

use serde::Deserialize;

/// Name of the global the browser entry point reads overrides from.
pub const GLOBAL_OVERRIDE: &str = "__PORTFOLIO_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Location of the project collection, relative to the page.
    pub data_url: String,
    /// Page that renders a single project from `?id=`.
    pub detail_page: String,
    /// Page the not-found view links back to.
    pub listing_page: String,
    /// Appended to the project name in the document title.
    pub title_suffix: String,
    pub debug_log: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_url: "data/projects.json".to_string(),
            detail_page: "project.html".to_string(),
            listing_page: "project_list.html".to_string(),
            title_suffix: "Jun".to_string(),
            debug_log: false,
        }
    }
}

impl SiteConfig {
    /// Parse an override object, filling unspecified fields with defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn detail_href(&self, id: &str) -> String {
        format!("{}?id={}", self.detail_page, id)
    }

    pub fn page_title(&self, project_name: &str) -> String {
        format!("{} | {}", project_name, self.title_suffix)
    }

    pub fn log_level(&self) -> log::Level {
        if self.debug_log {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}
