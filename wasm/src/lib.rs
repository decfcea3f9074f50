//! WebAssembly module for the Stocktag admin UI
//!
//! Provides client-side checks so a record or print request can be validated
//! before it is sent, including while offline:
//! - Product record validation
//! - Print request validation
//! - Record date parsing

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Validate a product record given as JSON; returns a JSON array of violations
#[wasm_bindgen]
pub fn validate_product_json(record_json: &str) -> Result<String, JsValue> {
    let record: ProductRecord = serde_json::from_str(record_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid product JSON: {}", e)))?;

    to_json(&validate_product(&record))
}

/// Validate a print request given as JSON; returns a JSON array of violations
#[wasm_bindgen]
pub fn validate_print_request_json(request_json: &str) -> Result<String, JsValue> {
    let request = PrintRequest::from_json(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid print request JSON: {}", e)))?;

    to_json(&validate_print_request(&request))
}

/// Normalize a record date: returns `DD.MM.YY`, or an empty string when unset
#[wasm_bindgen]
pub fn parse_item_date(value: &str) -> Result<String, JsValue> {
    match parse_date(value) {
        Ok(Some(date)) => Ok(date.to_string()),
        Ok(None) => Ok(String::new()),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Check whether a record date field is acceptable (empty or `DD.MM.YY`)
#[wasm_bindgen]
pub fn is_valid_item_date(value: &str) -> bool {
    parse_date(value).is_ok()
}

/// Number of labels a print request will produce
#[wasm_bindgen]
pub fn print_label_count(product_count: u32, copies: i32) -> u32 {
    if copies < 1 {
        return 0;
    }
    product_count.saturating_mul(copies as u32)
}
