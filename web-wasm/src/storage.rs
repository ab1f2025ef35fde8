//! APIキーのlocalStorage保存

use gloo::storage::{LocalStorage, Storage};

/// 保存キー（既存ページと同じ値を共有する）
pub const API_KEY_STORAGE_KEY: &str = "geminiApiKey";

/// 保存済みのAPIキー。未保存・空なら `None`
///
/// 値はJSONではなく生の文字列で保存されているため `raw()` で読む。
pub fn load_api_key() -> Option<String> {
    LocalStorage::raw()
        .get_item(API_KEY_STORAGE_KEY)
        .ok()
        .flatten()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn save_api_key(api_key: &str) -> Result<(), String> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err("API key must not be empty".into());
    }
    LocalStorage::raw()
        .set_item(API_KEY_STORAGE_KEY, api_key)
        .map_err(|e| format!("{:?}", e))
}
