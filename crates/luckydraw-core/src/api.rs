//! Wire contract of the analyze and draw endpoints
//!
//! Both endpoints answer with a JSON envelope carrying an `ok` flag and an
//! optional `error` message. Every other field is optional so that partial
//! bodies from a failing server still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FlowError;
use crate::receipt::Receipt;

/// One preview row: column name to display value, in server key order
pub type Row = serde_json::Map<String, Value>;

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<Row>>,
}

/// Body of `POST /api/draw`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
}

/// Columns, row count and preview of an analyzed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub columns: Vec<String>,
    pub row_count: u64,
    pub preview: Vec<Row>,
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(resp: AnalyzeResponse) -> Self {
        Self {
            columns: resp.columns.unwrap_or_default(),
            row_count: resp.row_count.unwrap_or(0),
            preview: resp.preview.unwrap_or_default(),
        }
    }
}

/// Winners and receipt of a successful draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub winners: Vec<String>,
    pub receipt: Option<Receipt>,
}

impl From<DrawResponse> for DrawResult {
    fn from(resp: DrawResponse) -> Self {
        Self {
            winners: resp.winners.unwrap_or_default(),
            receipt: resp.receipt,
        }
    }
}

/// Common `ok` / `error` envelope of both endpoints
pub trait Envelope {
    fn is_ok(&self) -> bool;
    fn error_message(&self) -> Option<&str>;
}

impl Envelope for AnalyzeResponse {
    fn is_ok(&self) -> bool {
        self.ok
    }

    fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Envelope for DrawResponse {
    fn is_ok(&self) -> bool {
        self.ok
    }

    fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// A decoded response together with its HTTP success flag
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub http_ok: bool,
    pub body: T,
}

impl<T> Reply<T> {
    pub fn new(http_ok: bool, body: T) -> Self {
        Self { http_ok, body }
    }
}

impl<T: Envelope> Reply<T> {
    /// Split into the success body or an application-level rejection
    ///
    /// An empty `error` string counts as no message.
    pub fn into_result(self) -> Result<T, FlowError> {
        if self.http_ok && self.body.is_ok() {
            return Ok(self.body);
        }
        let message = self
            .body
            .error_message()
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Err(FlowError::Rejected { message })
    }
}

/// Validated parameters sent to the draw endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawParams {
    pub column: String,
    pub k: u32,
    pub dedupe: bool,
}

impl DrawParams {
    /// Multipart text fields, in submission order
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            ("column", self.column.clone()),
            ("k", self.k.to_string()),
            ("dedupe", self.dedupe.to_string()),
        ]
    }
}

/// Parse the winner count text box
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of decimal digits is read and anything after it ignored. No digits,
/// zero or a negative value yields 1. Oversized values saturate.
pub fn parse_count(text: &str) -> u32 {
    let rest = text.trim_start();
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() || negative {
        return 1;
    }
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    value.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_count_plain() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count("  12"), 12);
        assert_eq!(parse_count("+7"), 7);
    }

    #[test]
    fn test_parse_count_trailing_garbage() {
        assert_eq!(parse_count("4 winners"), 4);
        assert_eq!(parse_count("2.9"), 2);
    }

    #[test]
    fn test_parse_count_defaults_to_one() {
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("abc"), 1);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("-5"), 1);
        assert_eq!(parse_count("-"), 1);
    }

    #[test]
    fn test_parse_count_saturates() {
        assert_eq!(parse_count("99999999999999"), u32::MAX);
    }

    #[test]
    fn test_form_fields() {
        let params = DrawParams {
            column: "Email".to_string(),
            k: 3,
            dedupe: false,
        };
        assert_eq!(
            params.form_fields(),
            [
                ("column", "Email".to_string()),
                ("k", "3".to_string()),
                ("dedupe", "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_analyze_response_keeps_key_order() {
        let body = r#"{"ok":true,"columns":["Zeta","Alpha"],"row_count":2,
            "preview":[{"Zeta":"1","Alpha":"2"}]}"#;
        let resp: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let keys: Vec<&String> = resp.preview.as_ref().unwrap()[0].keys().collect();
        assert_eq!(keys, ["Zeta", "Alpha"]);
    }

    #[test]
    fn test_partial_body_decodes() {
        let resp: AnalyzeResponse = serde_json::from_str(r#"{"ok":false}"#).unwrap();
        assert!(!resp.ok);
        assert!(resp.columns.is_none());

        let resp: DrawResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.ok);
    }

    #[test]
    fn test_reply_into_result() {
        let ok = Reply::new(true, DrawResponse {
            ok: true,
            winners: Some(vec!["Alice".into()]),
            ..Default::default()
        });
        assert!(ok.into_result().is_ok());

        let rejected = Reply::new(false, DrawResponse {
            ok: false,
            error: Some("k too large".into()),
            ..Default::default()
        });
        assert_eq!(
            rejected.into_result().unwrap_err(),
            FlowError::Rejected {
                message: Some("k too large".into())
            }
        );
    }

    #[test]
    fn test_http_error_with_ok_body_is_rejected() {
        let reply = Reply::new(false, AnalyzeResponse {
            ok: true,
            ..Default::default()
        });
        assert_eq!(
            reply.into_result().unwrap_err(),
            FlowError::Rejected { message: None }
        );
    }

    #[test]
    fn test_empty_error_counts_as_missing() {
        let reply = Reply::new(true, AnalyzeResponse {
            ok: false,
            error: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(
            reply.into_result().unwrap_err(),
            FlowError::Rejected { message: None }
        );
    }

    #[test]
    fn test_draw_result_from_response() {
        let resp: DrawResponse = serde_json::from_value(json!({
            "ok": true,
            "winners": ["Alice"],
            "receipt": {"seed": 42}
        }))
        .unwrap();
        let result = DrawResult::from(resp);
        assert_eq!(result.winners, ["Alice"]);
        assert_eq!(result.receipt.unwrap().as_value(), &json!({"seed": 42}));
    }
}
