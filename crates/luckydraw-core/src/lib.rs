//! Lucky Draw client core
//!
//! Platform independent logic behind the lucky draw page: upload a
//! spreadsheet for analysis, pick a column, request a draw and export the
//! receipt. File parsing, randomness and receipt construction happen on the
//! server; this crate only drives the two endpoints and the page.
//!
//! ## Architecture
//!
//! - `LuckyDraw` holds the page state and owns a `View` (the element handles)
//! - `Transport` is the HTTP seam, implemented with `fetch` in the wasm app
//! - `flow` runs begin → round trip → finish without holding the state borrow
//! - `render` and `escape` produce all markup; nothing unescaped reaches it
//!
//! The browser binding lives in `apps/luckydraw-web/wasm`.

pub mod api;
pub mod celebration;
pub mod config;
pub mod controller;
pub mod error;
pub mod escape;
pub mod flow;
pub mod receipt;
pub mod render;
pub mod transport;
pub mod view;

pub use api::{AnalysisResult, AnalyzeResponse, DrawParams, DrawResponse, DrawResult, Reply, Row};
pub use celebration::{Burst, Celebration, Tick};
pub use config::{ClientConfig, ElementIds};
pub use controller::{AnalyzeTicket, DrawTicket, FlowOutcome, LuckyDraw};
pub use error::{ConfigError, Flow, FlowError, TransportError};
pub use escape::{escape_html, escape_value};
pub use receipt::{Receipt, ReceiptExport};
pub use transport::{SelectedFile, Transport, Upload};
pub use view::{DrawInputs, HtmlSlot, Panel, TextSlot, View};
