//! Property-based tests for escaping, rendering and input parsing

use chrono::{TimeZone, Utc};
use luckydraw_core::api::{parse_count, Row};
use luckydraw_core::escape::escape_html;
use luckydraw_core::receipt::receipt_file_name;
use luckydraw_core::render::{preview_table_html, winners_html, NO_PREVIEW_HTML};
use proptest::prelude::*;
use serde_json::Value;

/// Inverse of `escape_html`, for checking the round trip
fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Tables of 1..8 rows sharing the same 1..6 columns
fn preview_rows() -> impl Strategy<Value = Vec<Row>> {
    (1usize..6, 1usize..8).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec("[ -~]{0,12}", cols), rows).prop_map(
            move |table| {
                table
                    .into_iter()
                    .map(|cells| {
                        cells
                            .into_iter()
                            .enumerate()
                            .map(|(i, cell)| (format!("col{}", i), Value::String(cell)))
                            .collect::<Row>()
                    })
                    .collect()
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // Escaping
    // ============================================================

    #[test]
    fn escaped_text_has_no_raw_specials(s in ".*") {
        let escaped = escape_html(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
        // Every remaining ampersand starts one of the five entities
        for (idx, _) in escaped.match_indices('&') {
            let tail = &escaped[idx..];
            prop_assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
                    .iter()
                    .any(|e| tail.starts_with(e))
            );
        }
    }

    #[test]
    fn escape_round_trips(s in "[&<>\"'a-z ]{0,40}") {
        prop_assert_eq!(unescape_html(&escape_html(&s)), s);
    }

    #[test]
    fn escape_is_identity_without_specials(s in "[a-zA-Z0-9 _.,@-]{0,40}") {
        prop_assert_eq!(escape_html(&s), s);
    }

    // ============================================================
    // Rendering
    // ============================================================

    #[test]
    fn preview_counts_match_input(preview in preview_rows()) {
        let html = preview_table_html(&preview);
        prop_assert_ne!(html.as_str(), NO_PREVIEW_HTML);
        prop_assert_eq!(html.matches("<th ").count(), preview[0].len());
        // one header row plus one per data row
        prop_assert_eq!(html.matches("<tr>").count(), preview.len() + 1);
        prop_assert_eq!(html.matches("<td ").count(), preview.len() * preview[0].len());
    }

    #[test]
    fn winners_list_keeps_order(names in prop::collection::vec("[a-z]{1,10}", 2..10)) {
        let html = winners_html(&names);
        prop_assert_eq!(html.matches("<li ").count(), names.len());
        let mut last = 0;
        for i in 1..=names.len() {
            let pos = html.find(&format!("#{}:", i)).unwrap();
            prop_assert!(pos >= last);
            last = pos;
        }
    }

    // ============================================================
    // Inputs and file names
    // ============================================================

    #[test]
    fn parse_count_is_positive(s in ".*") {
        prop_assert!(parse_count(&s) >= 1);
    }

    #[test]
    fn parse_count_reads_positive_integers(n in 1u32..1_000_000, suffix in "[a-z ]{0,5}") {
        prop_assert_eq!(parse_count(&format!("{}{}", n, suffix)), n);
    }

    #[test]
    fn receipt_file_name_is_filesystem_safe(millis in 0i64..4_102_444_800_000) {
        let now = Utc.timestamp_millis_opt(millis).unwrap();
        let name = receipt_file_name("lucky-draw-receipt", now);
        let stem = name.strip_suffix(".json").unwrap();
        prop_assert!(!stem.contains(':'));
        prop_assert!(!stem.contains('.'));
        prop_assert!(stem.starts_with("lucky-draw-receipt-"));
    }
}
