use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("case study data is malformed: {0}")]
    Data(#[from] serde_json::Error),

    #[error("case study has an empty id")]
    EmptyId,

    #[error("case study id `{0}` is used more than once")]
    DuplicateId(String),

    #[error("block `{block}` of case study `{id}` has no paragraphs")]
    EmptyBlock { id: String, block: String },

    #[error("no browser {0} available")]
    MissingGlobal(&'static str),

    #[error("javascript call failed: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(format!("{:?}", value))
    }
}

impl From<serde_wasm_bindgen::Error> for SiteError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        SiteError::Js(err.to_string())
    }
}
