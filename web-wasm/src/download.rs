//! ブラウザのダウンロード起動

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// オブジェクトURLを解放するまでの猶予（ダウンロード開始前に解放しない）
const REVOKE_AFTER_MS: u32 = 10_000;

/// バイト列を指定ファイル名でダウンロードさせる
pub fn download_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);

    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Timeout::new(REVOKE_AFTER_MS, move || {
        let _ = Url::revoke_object_url(&url);
    })
    .forget();

    Ok(())
}

/// プレビュー用のオブジェクトURL
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}
