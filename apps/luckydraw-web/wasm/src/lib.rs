//! WASM bindings for the lucky draw page
//!
//! All page state lives in Rust (`luckydraw_core::LuckyDraw`). This crate
//! supplies the browser pieces: the DOM view, `fetch` transport, receipt
//! download and the confetti loop.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { LuckyDrawApp } from './pkg/luckydraw_wasm.js';
//!
//! await init();
//!
//! // Stock element ids and endpoints
//! const app = LuckyDrawApp.mount();
//!
//! // Or override part of the config
//! const app = LuckyDrawApp.mount({ api_base: "https://draw.example.com", log_level: "debug" });
//! ```

pub mod app;
pub mod confetti;
pub mod dom;
pub mod download;
pub mod fetch;
pub mod logging;

use chrono::Utc;
use luckydraw_core::receipt::{receipt_file_name, DEFAULT_RECEIPT_PREFIX};
use wasm_bindgen::prelude::*;

pub use app::LuckyDrawApp;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Lucky Draw WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// HTML-escape a string the same way the page renders server values
#[wasm_bindgen(js_name = escapeHtml)]
pub fn escape_html(value: &str) -> String {
    luckydraw_core::escape_html(value)
}

/// File name a receipt downloaded right now would get
#[wasm_bindgen(js_name = receiptFileName)]
pub fn receipt_file_name_now(prefix: Option<String>) -> String {
    let prefix = prefix.unwrap_or_else(|| DEFAULT_RECEIPT_PREFIX.to_string());
    receipt_file_name(&prefix, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_escape_html_binding() {
        assert_eq!(escape_html("<b>&'\""), "&lt;b&gt;&amp;&#39;&quot;");
    }

    #[test]
    fn test_receipt_file_name_default_prefix() {
        let name = receipt_file_name_now(None);
        assert!(name.starts_with("lucky-draw-receipt-"));
        assert!(name.ends_with(".json"));
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_receipt_file_name_custom_prefix() {
        let name = receipt_file_name_now(Some("raffle".to_string()));
        assert!(name.starts_with("raffle-"));
    }
}
