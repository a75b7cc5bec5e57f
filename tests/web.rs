// Browser-side tests for the exported message handler
#![cfg(target_arch = "wasm32")]

use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use tab_organizer::Organizer;

fn js(value: Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap()
}

fn rust(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

fn window() -> Value {
    json!([
        {"id": 1, "url": "https://github.com/a", "title": "code review", "groupId": null},
        {"id": 2, "url": "https://github.com/b", "title": "python code", "groupId": null},
        {"id": 3, "url": "https://www.cnn.com/politics", "title": "Election", "groupId": null}
    ])
}

#[wasm_bindgen_test]
fn test_extract_domain_export() {
    assert_eq!(tab_organizer::extract_domain("https://www.GitHub.com/x"), "github.com");
    assert_eq!(tab_organizer::extract_domain("not a url"), "");
}

#[wasm_bindgen_test]
fn test_get_predictions_message() {
    let mut organizer = Organizer::new(JsValue::UNDEFINED).unwrap();

    let response = organizer
        .handle_message(js(json!({"action": "getPredictions", "tabs": window()})))
        .unwrap();

    let response = rust(response);
    let technology = response["categorizedTabs"]["Technology"].as_array().unwrap();
    assert_eq!(technology.len(), 2);
    assert_eq!(technology[0]["tab"]["id"].as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn test_categorize_tab_message() {
    let mut organizer = Organizer::new(JsValue::NULL).unwrap();

    let response = organizer
        .handle_message(js(json!({
            "action": "categorizeTab",
            "tab": {"id": 9, "url": "https://www.netflix.com/browse", "title": "Netflix"}
        })))
        .unwrap();

    assert_eq!(rust(response), json!({"category": "Entertainment"}));
}

#[wasm_bindgen_test]
fn test_add_category_updates_storage_snapshot() {
    let storage = js(json!({"selectedCategories": ["Social"], "userFeedbackEnabled": false}));
    let mut organizer = Organizer::new(storage).unwrap();

    organizer
        .handle_message(js(json!({"action": "addCategory", "name": "Rust", "keywords": ["cargo"]})))
        .unwrap();

    let snapshot = rust(organizer.storage_snapshot().unwrap());
    assert_eq!(snapshot["selectedCategories"], json!(["Social", "Rust"]));
    assert_eq!(snapshot["userCategoryKeywords"]["Rust"], json!(["cargo"]));
    assert_eq!(snapshot["userFeedbackEnabled"], false);
}

#[wasm_bindgen_test]
fn test_unknown_action_is_an_error() {
    let mut organizer = Organizer::new(JsValue::UNDEFINED).unwrap();

    let result = organizer.handle_message(js(json!({"action": "explode"})));

    let message = result.unwrap_err().as_string().unwrap();
    assert!(message.starts_with("failed to decode message"));
}
