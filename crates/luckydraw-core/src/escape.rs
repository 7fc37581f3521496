//! HTML text escaping for untrusted column names, cell values and winners

use serde_json::Value;

/// Escape `& < > " '` so the result is safe as HTML text or attribute content
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a JSON cell value for display
///
/// `null` renders as the empty string and strings render without their JSON
/// quotes. Anything else renders as its compact JSON text.
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => escape_html(s),
        other => escape_html(&other.to_string()),
    }
}
