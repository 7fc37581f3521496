//! Draw receipt storage and export
//!
//! The receipt is produced by the draw endpoint and never interpreted here.
//! It is kept as a raw JSON document, shown pretty-printed and exported as
//! a timestamped `.json` download.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default file name prefix of exported receipts
pub const DEFAULT_RECEIPT_PREFIX: &str = "lucky-draw-receipt";

/// MIME type of the downloaded receipt blob
pub const RECEIPT_MIME: &str = "application/json;charset=utf-8";

/// Opaque receipt document returned by the draw endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(Value);

impl Receipt {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 2-space indented JSON text
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

/// ISO-8601 UTC timestamp with `:` and `.` replaced by `-`
///
/// `2025-01-02T03:04:05.678Z` becomes `2025-01-02T03-04-05-678Z`.
pub fn timestamp_slug(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(&[':', '.'][..], "-")
}

/// Download file name for a receipt exported at `now`
pub fn receipt_file_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.json", prefix, timestamp_slug(now))
}

/// A receipt ready to hand to the browser download machinery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptExport {
    pub file_name: String,
    pub contents: String,
    pub mime: &'static str,
}

impl ReceiptExport {
    /// Build an export from the displayed receipt text
    ///
    /// Returns `None` when the text is empty or whitespace only.
    pub fn prepare(receipt_text: &str, prefix: &str, now: DateTime<Utc>) -> Option<Self> {
        let contents = receipt_text.trim();
        if contents.is_empty() {
            return None;
        }
        Some(Self {
            file_name: receipt_file_name(prefix, now),
            contents: contents.to_string(),
            mime: RECEIPT_MIME,
        })
    }
}
