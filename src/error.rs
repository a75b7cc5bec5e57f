/// Errors at the boundary with the browser
///
/// The classifiers never fail; only talking to the extension APIs and decoding
/// what they hand back can.
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    #[error("browser call {call} failed: {message}")]
    Browser { call: &'static str, message: String },
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },
    #[error("failed to encode {what}: {message}")]
    Encode { what: &'static str, message: String },
}

impl BridgeError {
    pub fn browser(call: &'static str, err: JsValue) -> Self {
        BridgeError::Browser {
            call,
            message: format!("{:?}", err),
        }
    }

    pub fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        BridgeError::Decode {
            what,
            message: err.to_string(),
        }
    }

    pub fn encode(what: &'static str, err: impl std::fmt::Display) -> Self {
        BridgeError::Encode {
            what,
            message: err.to_string(),
        }
    }
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
