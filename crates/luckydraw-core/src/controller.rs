//! Application state and the analyze / draw state machines
//!
//! Each flow is split into a synchronous `begin_*` phase, the transport
//! round trip (run by the caller, see `crate::flow`) and a synchronous
//! `finish_*` phase. The controller is never borrowed across the round
//! trip, so a second invocation may begin while the first is in flight.
//!
//! Every `begin_*` takes a new generation number for its flow. A finish
//! carrying an older generation is stale and leaves the page untouched.
//! Beginning an analyze also supersedes any in-flight draw, since its
//! results would belong to the previous file.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::{
    parse_count, AnalysisResult, AnalyzeResponse, DrawParams, DrawResponse, DrawResult, Reply,
};
use crate::error::{Flow, FlowError, TransportError};
use crate::receipt::{ReceiptExport, DEFAULT_RECEIPT_PREFIX};
use crate::render::{file_name_text, preview_table_html, row_count_text, winners_html};
use crate::transport::SelectedFile;
use crate::view::{HtmlSlot, Panel, TextSlot, View};

/// How a flow invocation ended
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Succeeded,
    Failed(FlowError),
    /// Superseded by a newer invocation; the page was not updated
    Stale,
}

impl FlowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlowOutcome::Succeeded)
    }
}

/// An analyze request that has begun and awaits its response
#[derive(Debug, Clone)]
pub struct AnalyzeTicket<F> {
    generation: u64,
    pub file: F,
}

impl<F> AnalyzeTicket<F> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A draw request that has begun and awaits its response
#[derive(Debug, Clone)]
pub struct DrawTicket<F> {
    generation: u64,
    pub file: F,
    pub params: DrawParams,
}

impl<F> DrawTicket<F> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Lucky draw page controller
pub struct LuckyDraw<V, F> {
    view: V,
    receipt_prefix: String,
    current_file: Option<F>,
    analysis: Option<AnalysisResult>,
    last_draw: Option<DrawResult>,
    receipt_text: String,
    analyze_generation: u64,
    draw_generation: u64,
}

impl<V: View, F: SelectedFile> LuckyDraw<V, F> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            receipt_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
            current_file: None,
            analysis: None,
            last_draw: None,
            receipt_text: String::new(),
            analyze_generation: 0,
            draw_generation: 0,
        }
    }

    pub fn with_receipt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.receipt_prefix = prefix.into();
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn current_file(&self) -> Option<&F> {
        self.current_file.as_ref()
    }

    /// Result of the last successful analyze of the current file
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn last_draw(&self) -> Option<&DrawResult> {
        self.last_draw.as_ref()
    }

    /// Receipt text as displayed, empty before the first successful draw
    pub fn receipt_text(&self) -> &str {
        &self.receipt_text
    }

    // ========================================================================
    // File selection
    // ========================================================================

    /// Record the user's file choice and begin analyzing it
    ///
    /// `None` clears the file name label and starts nothing.
    pub fn select_file(&mut self, file: Option<F>) -> Option<AnalyzeTicket<F>> {
        let label = file
            .as_ref()
            .map(|f| file_name_text(&f.file_name()))
            .unwrap_or_default();
        self.view.set_text(TextSlot::FileName, &label);
        match file {
            Some(file) => Some(self.begin_analyze(file)),
            None => {
                self.current_file = None;
                None
            }
        }
    }

    pub fn drag_over(&mut self) {
        self.view.set_drop_highlight(true);
    }

    pub fn drag_leave(&mut self) {
        self.view.set_drop_highlight(false);
    }

    // ========================================================================
    // Analyze flow
    // ========================================================================

    /// Begin analyzing `file`, which becomes the current file
    ///
    /// Any in-flight draw is superseded and its progress and error panels
    /// are hidden.
    pub fn begin_analyze(&mut self, file: F) -> AnalyzeTicket<F> {
        self.analyze_generation += 1;
        self.draw_generation += 1;
        self.current_file = Some(file.clone());
        self.analysis = None;
        self.last_draw = None;
        self.receipt_text.clear();

        self.view.hide(Panel::AnalyzeError);
        self.view.show(Panel::AnalyzeProgress);
        self.view.hide(Panel::AnalyzeResult);
        self.view.hide(Panel::Results);
        self.view.hide(Panel::DrawProgress);
        self.view.hide(Panel::DrawError);
        self.view.set_html(HtmlSlot::Winners, "");
        self.view.set_text(TextSlot::Receipt, "");

        debug!(
            generation = self.analyze_generation,
            file = %file.file_name(),
            "analyze started"
        );
        AnalyzeTicket {
            generation: self.analyze_generation,
            file,
        }
    }

    pub fn finish_analyze(
        &mut self,
        ticket: AnalyzeTicket<F>,
        response: Result<Reply<AnalyzeResponse>, TransportError>,
    ) -> FlowOutcome {
        if ticket.generation != self.analyze_generation {
            warn!(
                generation = ticket.generation,
                current = self.analyze_generation,
                "discarding stale analyze response"
            );
            return FlowOutcome::Stale;
        }

        self.view.hide(Panel::AnalyzeProgress);
        let result = response
            .map_err(FlowError::from)
            .and_then(Reply::into_result)
            .map(AnalysisResult::from);

        match result {
            Ok(analysis) => {
                self.view.set_column_options(&analysis.columns);
                self.view.set_draw_defaults(1, true);
                self.view
                    .set_text(TextSlot::RowCount, &row_count_text(analysis.row_count));
                self.view
                    .set_html(HtmlSlot::PreviewTable, &preview_table_html(&analysis.preview));
                self.view.show(Panel::AnalyzeResult);

                info!(
                    columns = analysis.columns.len(),
                    rows = analysis.row_count,
                    "analyze succeeded"
                );
                self.analysis = Some(analysis);
                FlowOutcome::Succeeded
            }
            Err(err) => self.fail(Flow::Analyze, err),
        }
    }

    // ========================================================================
    // Draw flow
    // ========================================================================

    /// Read the draw controls and begin a draw
    ///
    /// Fails with `FlowError::NoFile`, already shown on the page, when no
    /// file has been analyzed yet.
    pub fn begin_draw(&mut self) -> Result<DrawTicket<F>, FlowError> {
        self.view.hide(Panel::DrawError);

        let analyzed = self.analysis.as_ref().and(self.current_file.clone());
        let Some(file) = analyzed else {
            self.view
                .set_text(TextSlot::DrawError, &FlowError::NoFile.user_message(Flow::Draw));
            self.view.show(Panel::DrawError);
            debug!("draw requested without an analyzed file");
            return Err(FlowError::NoFile);
        };

        let inputs = self.view.draw_inputs();
        let params = DrawParams {
            column: inputs.column,
            k: parse_count(&inputs.count_text),
            dedupe: inputs.dedupe,
        };

        self.draw_generation += 1;
        self.view.hide(Panel::Results);
        self.view.hide(Panel::DrawError);
        self.view.show(Panel::DrawProgress);

        debug!(
            generation = self.draw_generation,
            column = %params.column,
            k = params.k,
            dedupe = params.dedupe,
            "draw started"
        );
        Ok(DrawTicket {
            generation: self.draw_generation,
            file,
            params,
        })
    }

    pub fn finish_draw(
        &mut self,
        ticket: DrawTicket<F>,
        response: Result<Reply<DrawResponse>, TransportError>,
    ) -> FlowOutcome {
        if ticket.generation != self.draw_generation {
            warn!(
                generation = ticket.generation,
                current = self.draw_generation,
                "discarding stale draw response"
            );
            return FlowOutcome::Stale;
        }

        self.view.hide(Panel::DrawProgress);
        let result = response
            .map_err(FlowError::from)
            .and_then(Reply::into_result)
            .map(DrawResult::from);

        match result {
            Ok(draw) => {
                if !draw.winners.is_empty() {
                    self.view.celebrate();
                }
                self.view
                    .set_html(HtmlSlot::Winners, &winners_html(&draw.winners));

                self.receipt_text = draw
                    .receipt
                    .as_ref()
                    .map(|r| r.to_pretty_json())
                    .unwrap_or_default();
                self.view.set_text(TextSlot::Receipt, &self.receipt_text);
                self.view.show(Panel::Results);

                info!(winners = draw.winners.len(), "draw succeeded");
                self.last_draw = Some(draw);
                FlowOutcome::Succeeded
            }
            Err(err) => self.fail(Flow::Draw, err),
        }
    }

    // ========================================================================
    // Receipt export
    // ========================================================================

    /// Export the displayed receipt, `None` when there is nothing to export
    pub fn export_receipt(&self, now: DateTime<Utc>) -> Option<ReceiptExport> {
        ReceiptExport::prepare(&self.receipt_text, &self.receipt_prefix, now)
    }

    fn fail(&mut self, flow: Flow, err: FlowError) -> FlowOutcome {
        let (slot, panel) = match flow {
            Flow::Analyze => (TextSlot::AnalyzeError, Panel::AnalyzeError),
            Flow::Draw => (TextSlot::DrawError, Panel::DrawError),
        };
        warn!(flow = flow.as_str(), error = %err, "request failed");
        self.view.set_text(slot, &err.user_message(flow));
        self.view.show(panel);
        FlowOutcome::Failed(err)
    }
}
