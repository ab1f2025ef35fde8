//! Gemini generateContent APIの型定義
//!
//! リクエスト組み立てとレスポンスからのテキスト抽出のみを扱う。
//! HTTP送信はホスト側（CLI: reqwest / Web: fetch）が行う。

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prompts::RENAME_PROMPT;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Gemini APIレスポンス
#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// generateContentのURL（APIキーはクエリで渡す）
pub fn generate_content_url(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// ファイル名提案リクエストを組み立てる
///
/// # Arguments
/// * `image_bytes` - 画像の生バイト列（ここでBase64化する）
/// * `mime_type` - 画像のMIMEタイプ
pub fn build_rename_request(image_bytes: &[u8], mime_type: &str) -> GeminiRequest {
    let data = base64::engine::general_purpose::STANDARD.encode(image_bytes);

    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: RENAME_PROMPT.to_string() },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data,
                    },
                },
            ],
        }],
    }
}

/// 最初の候補の最初のテキストパートを取り出す
pub fn extract_text(response: &GeminiResponse) -> Result<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(Error::EmptyResponse)
}

/// レスポンスJSON文字列から直接テキストを取り出す
pub fn extract_text_from_json(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)?;
    extract_text(&response)
}
