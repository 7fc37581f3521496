//! The page surface the controller drives
//!
//! A `View` owns the element handles. The controller only addresses them
//! through the slot enums below, so the browser binding and the test
//! doubles expose the same surface.

/// Panels toggled between shown and hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    AnalyzeProgress,
    AnalyzeError,
    AnalyzeResult,
    DrawProgress,
    DrawError,
    Results,
}

/// Elements whose text content is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    FileName,
    AnalyzeError,
    RowCount,
    DrawError,
    Receipt,
}

/// Elements whose markup is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlSlot {
    PreviewTable,
    Winners,
}

/// Raw draw controls as read at click time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawInputs {
    pub column: String,
    pub count_text: String,
    pub dedupe: bool,
}

pub trait View {
    fn set_visible(&mut self, panel: Panel, visible: bool);

    fn set_text(&mut self, slot: TextSlot, text: &str);

    /// Replace the slot's markup. Callers pass pre-escaped markup only.
    fn set_html(&mut self, slot: HtmlSlot, html: &str);

    /// Replace every column option, preserving order
    fn set_column_options(&mut self, columns: &[String]);

    fn set_draw_defaults(&mut self, k: u32, dedupe: bool);

    fn draw_inputs(&self) -> DrawInputs;

    /// Toggle the drop zone's drag-over styling
    fn set_drop_highlight(&mut self, active: bool);

    /// Start the celebration sequence. A view without one does nothing.
    fn celebrate(&mut self);

    fn show(&mut self, panel: Panel) {
        self.set_visible(panel, true);
    }

    fn hide(&mut self, panel: Panel) {
        self.set_visible(panel, false);
    }
}
