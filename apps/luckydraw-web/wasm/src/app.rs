//! Page mount and event wiring

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use luckydraw_core::{flow, ClientConfig, ElementIds, LuckyDraw};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, EventTarget, File, HtmlElement, HtmlInputElement};

use crate::dom::{element_by_id, DomView};
use crate::download::save_receipt;
use crate::fetch::{describe_js_error, BrowserFile, FetchTransport};
use crate::logging;

struct Shared {
    app: RefCell<LuckyDraw<DomView, BrowserFile>>,
    transport: FetchTransport,
    document: web_sys::Document,
}

impl Shared {
    fn select(self: &Rc<Self>, file: File) {
        let shared = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            flow::select_file(&shared.app, &shared.transport, Some(BrowserFile(file))).await;
        });
    }

    fn draw(self: &Rc<Self>) {
        let shared = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            flow::draw(&shared.app, &shared.transport).await;
        });
    }

    fn download_receipt(&self) {
        let export = self.app.borrow().export_receipt(Utc::now());
        let Some(export) = export else {
            return;
        };
        if let Err(err) = save_receipt(&self.document, &export) {
            warn!(error = %describe_js_error(&err), "receipt download failed");
        }
    }
}

/// Event listener removed from its target when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// The mounted lucky draw page
///
/// Listeners stay attached for as long as this object is alive.
#[wasm_bindgen]
pub struct LuckyDrawApp {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl LuckyDrawApp {
    /// Mount on the current document
    ///
    /// `config` is an optional object with `ClientConfig` fields; anything
    /// left out uses the stock page defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LuckyDrawApp, JsValue> {
        let config = parse_config(config)?;
        let level = config
            .level()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        logging::init(level);

        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let view = DomView::from_ids(&document, &config.elements, config.celebration_ms)?;
        let controller =
            LuckyDraw::new(view).with_receipt_prefix(config.receipt_prefix.clone());

        let shared = Rc::new(Shared {
            app: RefCell::new(controller),
            transport: FetchTransport::new(&config),
            document,
        });

        let mut app = LuckyDrawApp {
            shared,
            listeners: Vec::new(),
        };
        app.bind(&config.elements)?;

        info!(
            analyze = %config.analyze_url(),
            draw = %config.draw_url(),
            "lucky draw mounted"
        );
        Ok(app)
    }

    /// Same as the constructor, for `LuckyDrawApp.mount(config?)`
    pub fn mount(config: JsValue) -> Result<LuckyDrawApp, JsValue> {
        Self::new(config)
    }

    /// Number of attached event listeners
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether a receipt is available for download
    #[wasm_bindgen(js_name = hasReceipt)]
    pub fn has_receipt(&self) -> bool {
        !self.shared.app.borrow().receipt_text().trim().is_empty()
    }

    /// Trigger the receipt download, a no-op before the first draw
    #[wasm_bindgen(js_name = downloadReceipt)]
    pub fn download_receipt(&self) {
        self.shared.download_receipt();
    }
}

impl LuckyDrawApp {
    fn bind(&mut self, ids: &ElementIds) -> Result<(), JsValue> {
        let document = self.shared.document.clone();
        let dropzone: HtmlElement = element_by_id(&document, &ids.dropzone)?;
        let file_input: HtmlInputElement = element_by_id(&document, &ids.file_input)?;
        let draw_button: HtmlElement = element_by_id(&document, &ids.draw_button)?;
        let download_button: HtmlElement =
            element_by_id(&document, &ids.download_receipt_button)?;

        // Drop zone opens the file picker
        let picker = file_input.clone();
        self.listen(&dropzone, "click", move |_| picker.click())?;

        let shared = Rc::clone(&self.shared);
        self.listen(&dropzone, "dragover", move |event| {
            event.prevent_default();
            shared.app.borrow_mut().drag_over();
        })?;

        let shared = Rc::clone(&self.shared);
        self.listen(&dropzone, "dragleave", move |_| {
            shared.app.borrow_mut().drag_leave();
        })?;

        let shared = Rc::clone(&self.shared);
        self.listen(&dropzone, "drop", move |event| {
            event.prevent_default();
            shared.app.borrow_mut().drag_leave();
            let file = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                shared.select(file);
            }
        })?;

        let shared = Rc::clone(&self.shared);
        let input = file_input.clone();
        self.listen(&file_input, "change", move |_| {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                shared.select(file);
            }
        })?;

        let shared = Rc::clone(&self.shared);
        self.listen(&draw_button, "click", move |_| shared.draw())?;

        let shared = Rc::clone(&self.shared);
        self.listen(&download_button, "click", move |_| {
            shared.download_receipt();
        })?;

        Ok(())
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        self.listeners.push(Listener::attach(target, event, handler)?);
        Ok(())
    }
}

fn parse_config(value: JsValue) -> Result<ClientConfig, JsValue> {
    let config: ClientConfig = if value.is_undefined() || value.is_null() {
        ClientConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}
