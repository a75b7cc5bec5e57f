/// Tab Organizer - Chrome Extension that groups tabs by category
/// Built with Rust + WASM + Yew

pub mod category;
pub mod config;
pub mod corpus;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod feedback;
pub mod grouping;
pub mod history;
pub mod keyword;
pub mod operations;
pub mod storage;
pub mod tab_data;
pub mod text;
pub mod tfidf;
pub mod ui;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::dispatch::{Request, Session};
use crate::error::BridgeError;
use crate::storage::StorageData;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core domain functions for JavaScript access
#[wasm_bindgen]
pub fn extract_domain(url: &str) -> String {
    domain::extract_domain(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

/// Serialize for JS with maps as plain objects
pub(crate) fn to_js<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<JsValue, BridgeError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| BridgeError::encode(what, e))
}

pub(crate) fn from_js<T: serde::de::DeserializeOwned>(what: &'static str, value: JsValue) -> Result<T, BridgeError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| BridgeError::decode(what, e))
}

/// Message handler for the background service worker
#[wasm_bindgen]
pub struct Organizer {
    session: Session,
}

#[wasm_bindgen]
impl Organizer {
    /// `storage` is whatever chrome.storage.local returned; missing keys take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(storage: JsValue) -> Result<Organizer, JsValue> {
        let storage: StorageData = if storage.is_undefined() || storage.is_null() {
            StorageData::with_defaults()
        } else {
            from_js("storage", storage)?
        };

        Ok(Organizer {
            session: Session::new(storage),
        })
    }

    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message: JsValue) -> Result<JsValue, JsValue> {
        let request: Request = from_js("message", message)?;
        let response = self.session.handle(request);
        Ok(to_js("response", &response)?)
    }

    /// Current state to write back to chrome.storage.local
    #[wasm_bindgen(js_name = storageSnapshot)]
    pub fn storage_snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(to_js("storage", self.session.storage())?)
    }
}
