//! WASM bindings for Combi Engine
//!
//! Runs ponderation generation directly in the browser, next to the group
//! editor, without a round trip to the server.

use wasm_bindgen::prelude::*;

use crate::request::{handle, GenerationRequest};

// Use wee_alloc for smaller WASM binary
#[cfg(feature = "wasm")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Generate ponderations from a JSON project description.
///
/// Returns the JSON response; malformed input yields a JS error.
#[wasm_bindgen]
pub fn generate_ponderations(input: &str) -> Result<String, JsValue> {
    let request: GenerationRequest = serde_json::from_str(input)
        .map_err(|e| JsValue::from_str(&format!("Invalid request: {}", e)))?;

    let response = handle(request);
    if let Some(error) = &response.error {
        web_sys::console::warn_1(&JsValue::from_str(error));
    }

    serde_json::to_string(&response).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crate version, for display in the UI
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
