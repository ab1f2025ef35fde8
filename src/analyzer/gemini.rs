//! Gemini API (generateContent) クライアント

use super::NameSuggester;
use crate::error::{LabelerError, Result};
use image_labeler_common::{build_rename_request, extract_text, generate_content_url, GeminiResponse};
use std::time::Duration;

/// エラー本文をログ・表示に使う際の上限
const MAX_ERROR_BODY_CHARS: usize = 300;

/// APIキーとモデルIDを明示的に受け取るクライアント
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LabelerError::MissingApiKey);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl NameSuggester for GeminiClient {
    async fn suggest_name(&self, image: &[u8], mime_type: &str) -> Result<String> {
        let request = build_rename_request(image, mime_type);
        // URLにはAPIキーが含まれるためログに出さない
        let url = generate_content_url(&self.model, &self.api_key);

        log::debug!("POST {}:generateContent ({} bytes, {})", self.model, image.len(), mime_type);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LabelerError::ApiCall(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        let body = response.text().await.map_err(|e| e.without_url())?;
        let text = parse_response(&body)?;
        log::debug!("model response: {}", text);
        Ok(text)
    }
}

/// 応答本文から最初の候補のテキストを取り出す
fn parse_response(body: &str) -> Result<String> {
    let payload: GeminiResponse = serde_json::from_str(body)?;
    Ok(extract_text(&payload)?)
}

/// HTTPエラーを分類する。キーの拒否は実行全体を止める
fn classify_failure(status: u16, body: &str) -> LabelerError {
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    let key_rejected = matches!(status, 401 | 403)
        || (status == 400 && (body.contains("API_KEY_INVALID") || body.contains("API key not valid")));

    if key_rejected {
        LabelerError::InvalidApiKey(body)
    } else {
        LabelerError::ApiStatus { status, body }
    }
}
