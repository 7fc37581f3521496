//! DOM-backed implementation of the controller's `View`

use luckydraw_core::{DrawInputs, ElementIds, HtmlSlot, Panel, TextSlot, View};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

use crate::confetti;

const HIDDEN_CLASS: &str = "hidden";
const DROP_HIGHLIGHT: [&str; 2] = ["border-indigo-400", "bg-indigo-50"];

/// Look up an element by id and cast it to the expected type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

/// Element handles of the lucky draw page, resolved once at mount
pub struct DomView {
    dropzone: Element,
    file_name: Element,
    analyze_progress: Element,
    analyze_error: Element,
    analyze_result: Element,
    column_select: HtmlSelectElement,
    k_input: HtmlInputElement,
    dedupe_toggle: HtmlInputElement,
    row_count: Element,
    preview_table: Element,
    draw_progress: Element,
    draw_error: Element,
    results_section: Element,
    winners_list: Element,
    receipt_json: Element,
    celebration_ms: u32,
}

impl DomView {
    pub fn from_ids(
        document: &Document,
        ids: &ElementIds,
        celebration_ms: u32,
    ) -> Result<Self, JsValue> {
        Ok(Self {
            dropzone: element_by_id(document, &ids.dropzone)?,
            file_name: element_by_id(document, &ids.file_name)?,
            analyze_progress: element_by_id(document, &ids.analyze_progress)?,
            analyze_error: element_by_id(document, &ids.analyze_error)?,
            analyze_result: element_by_id(document, &ids.analyze_result)?,
            column_select: element_by_id(document, &ids.column_select)?,
            k_input: element_by_id(document, &ids.k_input)?,
            dedupe_toggle: element_by_id(document, &ids.dedupe_toggle)?,
            row_count: element_by_id(document, &ids.row_count)?,
            preview_table: element_by_id(document, &ids.preview_table)?,
            draw_progress: element_by_id(document, &ids.draw_progress)?,
            draw_error: element_by_id(document, &ids.draw_error)?,
            results_section: element_by_id(document, &ids.results_section)?,
            winners_list: element_by_id(document, &ids.winners_list)?,
            receipt_json: element_by_id(document, &ids.receipt_json)?,
            celebration_ms,
        })
    }

    fn panel(&self, panel: Panel) -> &Element {
        match panel {
            Panel::AnalyzeProgress => &self.analyze_progress,
            Panel::AnalyzeError => &self.analyze_error,
            Panel::AnalyzeResult => &self.analyze_result,
            Panel::DrawProgress => &self.draw_progress,
            Panel::DrawError => &self.draw_error,
            Panel::Results => &self.results_section,
        }
    }

    fn text_slot(&self, slot: TextSlot) -> &Element {
        match slot {
            TextSlot::FileName => &self.file_name,
            TextSlot::AnalyzeError => &self.analyze_error,
            TextSlot::RowCount => &self.row_count,
            TextSlot::DrawError => &self.draw_error,
            TextSlot::Receipt => &self.receipt_json,
        }
    }

    fn html_slot(&self, slot: HtmlSlot) -> &Element {
        match slot {
            HtmlSlot::PreviewTable => &self.preview_table,
            HtmlSlot::Winners => &self.winners_list,
        }
    }

    fn replace_options(&self, columns: &[String]) -> Result<(), JsValue> {
        self.column_select.set_inner_html("");
        for column in columns {
            let option = HtmlOptionElement::new_with_text_and_value(column, column)?;
            self.column_select.append_child(&option)?;
        }
        Ok(())
    }
}

impl View for DomView {
    fn set_visible(&mut self, panel: Panel, visible: bool) {
        let classes = self.panel(panel).class_list();
        let result = if visible {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };
        if result.is_err() {
            warn!(?panel, "failed to toggle panel visibility");
        }
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.text_slot(slot).set_text_content(Some(text));
    }

    fn set_html(&mut self, slot: HtmlSlot, html: &str) {
        self.html_slot(slot).set_inner_html(html);
    }

    fn set_column_options(&mut self, columns: &[String]) {
        if let Err(err) = self.replace_options(columns) {
            warn!(error = ?err, "failed to populate column options");
        }
    }

    fn set_draw_defaults(&mut self, k: u32, dedupe: bool) {
        self.k_input.set_value(&k.to_string());
        self.dedupe_toggle.set_checked(dedupe);
    }

    fn draw_inputs(&self) -> DrawInputs {
        DrawInputs {
            column: self.column_select.value(),
            count_text: self.k_input.value(),
            dedupe: self.dedupe_toggle.checked(),
        }
    }

    fn set_drop_highlight(&mut self, active: bool) {
        let classes = self.dropzone.class_list();
        let [first, second] = DROP_HIGHLIGHT;
        let result = if active {
            classes.add_2(first, second)
        } else {
            classes.remove_2(first, second)
        };
        if result.is_err() {
            warn!(active, "failed to toggle drop zone highlight");
        }
    }

    fn celebrate(&mut self) {
        confetti::celebrate(self.celebration_ms);
    }
}

// Browser tests, run with wasm-pack test --headless
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> Document {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(concat!(
            r#"<div id="dropzone"></div><input id="file-input" type="file">"#,
            r#"<p id="file-name"></p><div id="analyze-progress" class="hidden"></div>"#,
            r#"<div id="analyze-error" class="hidden"></div><div id="analyze-result" class="hidden"></div>"#,
            r#"<select id="column-select"></select><input id="k-input" type="text">"#,
            r#"<input id="dedupe-toggle" type="checkbox"><p id="row-count"></p>"#,
            r#"<table id="preview-table"></table><button id="draw-btn"></button>"#,
            r#"<div id="draw-progress" class="hidden"></div><div id="draw-error" class="hidden"></div>"#,
            r#"<section id="results-section" class="hidden"></section><div id="winners-list"></div>"#,
            r#"<pre id="receipt-json"></pre><button id="download-receipt-btn"></button>"#
        ));
        document
    }

    #[wasm_bindgen_test]
    fn test_mount_default_ids() {
        let document = page();
        assert!(DomView::from_ids(&document, &ElementIds::default(), 2000).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_missing_element_is_error() {
        let document = page();
        let ids = ElementIds {
            row_count: "nope".to_string(),
            ..ElementIds::default()
        };
        assert!(DomView::from_ids(&document, &ids, 2000).is_err());
    }

    #[wasm_bindgen_test]
    fn test_visibility_toggles_hidden_class() {
        let document = page();
        let mut view = DomView::from_ids(&document, &ElementIds::default(), 2000).unwrap();
        view.show(Panel::Results);
        assert!(!view.results_section.class_list().contains(HIDDEN_CLASS));
        view.hide(Panel::Results);
        assert!(view.results_section.class_list().contains(HIDDEN_CLASS));
    }

    #[wasm_bindgen_test]
    fn test_drop_highlight_classes() {
        let document = page();
        let mut view = DomView::from_ids(&document, &ElementIds::default(), 2000).unwrap();
        view.set_drop_highlight(true);
        let classes = view.dropzone.class_list();
        assert!(DROP_HIGHLIGHT.iter().all(|c| classes.contains(c)));

        view.set_drop_highlight(false);
        assert!(!DROP_HIGHLIGHT.iter().any(|c| classes.contains(c)));
    }

    #[wasm_bindgen_test]
    fn test_column_options_and_inputs() {
        let document = page();
        let mut view = DomView::from_ids(&document, &ElementIds::default(), 2000).unwrap();
        view.set_column_options(&["A".to_string(), "B".to_string()]);
        view.set_draw_defaults(1, true);

        assert_eq!(view.column_select.length(), 2);
        let inputs = view.draw_inputs();
        assert_eq!(inputs.column, "A");
        assert_eq!(inputs.count_text, "1");
        assert!(inputs.dedupe);
    }
}
