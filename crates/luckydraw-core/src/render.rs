//! Markup for the preview table and the winners panel

use std::fmt::Write;

use crate::api::Row;
use crate::escape::{escape_html, escape_value};

/// Placeholder table body for an empty preview
pub const NO_PREVIEW_HTML: &str =
    r#"<tbody><tr><td class="p-2 text-gray-500">No preview available.</td></tr></tbody>"#;

/// Render the preview table contents (`<thead>` + `<tbody>`)
///
/// Columns come from the key order of the first row. Later rows are not
/// reconciled: a missing key renders an empty cell and extra keys are
/// dropped.
pub fn preview_table_html(preview: &[Row]) -> String {
    let Some(first) = preview.first() else {
        return NO_PREVIEW_HTML.to_string();
    };
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut html = String::from(r#"<thead class="bg-gray-50"><tr>"#);
    for column in &columns {
        let _ = write!(
            html,
            r#"<th class="px-3 py-2 text-left font-semibold text-gray-700">{}</th>"#,
            escape_html(column)
        );
    }
    html.push_str("</tr></thead>");

    html.push_str(r#"<tbody class="divide-y divide-gray-200">"#);
    for row in preview {
        html.push_str("<tr>");
        for column in &columns {
            let cell = row.get(*column).map(escape_value).unwrap_or_default();
            let _ = write!(
                html,
                r#"<td class="px-3 py-2 whitespace-nowrap text-gray-800">{}</td>"#,
                cell
            );
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");
    html
}

/// Render the winners panel
///
/// A single winner gets a highlighted card; any other count renders a
/// 1-based ordered list.
pub fn winners_html(winners: &[String]) -> String {
    if let [winner] = winners {
        return format!(
            concat!(
                r#"<div class="p-4 rounded-md bg-emerald-50 border border-emerald-200 text-emerald-900">"#,
                r#"<p class="font-semibold">Winner:</p>"#,
                r#"<p class="mt-1 text-lg">{}</p>"#,
                "</div>"
            ),
            escape_html(winner)
        );
    }

    let mut html = String::from(r#"<ol class="list-decimal list-inside space-y-1">"#);
    for (idx, winner) in winners.iter().enumerate() {
        let _ = write!(
            html,
            r#"<li class="text-gray-900"><span class="font-semibold">#{}:</span> {}</li>"#,
            idx + 1,
            escape_html(winner)
        );
    }
    html.push_str("</ol>");
    html
}

/// Text of the row count label
pub fn row_count_text(row_count: u64) -> String {
    format!("Rows detected: {}", row_count)
}

/// Text of the selected file label
pub fn file_name_text(name: &str) -> String {
    format!("Selected file: {}", name)
}
