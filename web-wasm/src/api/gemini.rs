//! Gemini API連携（fetch）
//!
//! リクエスト/レスポンス型とファイル名の整形はCLIと共通。

use image_labeler_common::{build_rename_request, extract_text_from_json, generate_content_url, sanitize_suggestion};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// エラー本文の表示上限
const MAX_ERROR_BODY: usize = 300;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// 画像1枚を解析し、整形済みのベース名を返す
///
/// # Arguments
/// * `api_key` - Gemini API key
/// * `model` - モデルID（例: "gemini-2.0-flash"）
/// * `image` - 画像のバイト列
/// * `mime_type` - 画像のMIMEタイプ（File.type）
pub async fn suggest_name(api_key: &str, model: &str, image: &[u8], mime_type: &str) -> Result<String, JsValue> {
    let body = serde_json::to_string(&build_rename_request(image, mime_type)).map_err(to_js)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&generate_content_url(model, api_key), &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();
    if !resp.ok() {
        let snippet: String = text.chars().take(MAX_ERROR_BODY).collect();
        return Err(JsValue::from_str(&format!("API error {}: {}", resp.status(), snippet)));
    }

    let raw = extract_text_from_json(&text).map_err(to_js)?;
    sanitize_suggestion(&raw).map_err(to_js)
}
