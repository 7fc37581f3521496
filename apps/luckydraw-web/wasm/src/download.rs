//! Browser download of an exported receipt

use js_sys::Array;
use luckydraw_core::ReceiptExport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

/// Object URL revoked when dropped
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> Result<Self, JsValue> {
        Url::create_object_url_with_blob(blob).map(Self)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.0);
    }
}

/// Save `export` through a temporary anchor
///
/// The object URL only lives for this call; it is revoked right after the
/// click whether or not the browser went on to save the file.
pub fn save_receipt(document: &Document, export: &ReceiptExport) -> Result<(), JsValue> {
    let parts = Array::of1(&JsValue::from_str(&export.contents));
    let props = BlobPropertyBag::new();
    props.set_type(export.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)?;

    let url = ObjectUrl::for_blob(&blob)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("Failed to create download link"))?;
    anchor.set_href(url.as_str());
    anchor.set_download(&export.file_name);

    let body = document.body().ok_or("No document body")?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Ok(())
}
