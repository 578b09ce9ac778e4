use thiserror::Error;

/// Reasons the project detail page falls back to the not-found view.
///
/// Every variant is rendered the same way; the distinction only shows up in
/// the console log.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("missing `id` query parameter")]
    MissingId,
    #[error("no project with id `{0}`")]
    NotFound(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("project data request returned HTTP {0}")]
    Status(u16),
    #[error("malformed project data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<LoadError> for wasm_bindgen::JsValue {
    fn from(err: LoadError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
