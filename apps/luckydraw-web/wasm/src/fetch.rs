//! `fetch` based transport for the analyze and draw endpoints

use async_trait::async_trait;
use luckydraw_core::api::{AnalyzeResponse, DrawParams, DrawResponse, Reply};
use luckydraw_core::{ClientConfig, SelectedFile, Transport, TransportError};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

/// A file picked in the browser
#[derive(Debug, Clone)]
pub struct BrowserFile(pub File);

impl SelectedFile for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }
}

pub struct FetchTransport {
    analyze_url: String,
    draw_url: String,
}

impl FetchTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            analyze_url: config.analyze_url(),
            draw_url: config.draw_url(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type File = BrowserFile;

    async fn analyze(&self, file: &BrowserFile) -> Result<Reply<AnalyzeResponse>, TransportError> {
        let form = FormData::new().map_err(network_error)?;
        form.append_with_blob("file", &file.0)
            .map_err(network_error)?;
        post_form(&self.analyze_url, &form).await
    }

    async fn draw(
        &self,
        file: &BrowserFile,
        params: &DrawParams,
    ) -> Result<Reply<DrawResponse>, TransportError> {
        let form = FormData::new().map_err(network_error)?;
        form.append_with_blob("file", &file.0)
            .map_err(network_error)?;
        for (name, value) in params.form_fields() {
            form.append_with_str(name, &value).map_err(network_error)?;
        }
        post_form(&self.draw_url, &form).await
    }
}

/// POST a multipart form and decode the JSON body whatever the status
async fn post_form<T: DeserializeOwned>(
    url: &str,
    form: &FormData,
) -> Result<Reply<T>, TransportError> {
    let window = web_sys::window().ok_or_else(|| TransportError::Network("No window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form);
    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let response: Response = response.dyn_into().map_err(network_error)?;

    // Decoding from text keeps the server's key order in preview rows and receipts
    let text = JsFuture::from(response.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    let body = serde_json::from_str(&text.as_string().unwrap_or_default())?;

    Ok(Reply::new(response.ok(), body))
}

fn network_error(value: JsValue) -> TransportError {
    TransportError::Network(describe_js_error(&value))
}

/// Render a thrown JS value the way `String(err)` would
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
