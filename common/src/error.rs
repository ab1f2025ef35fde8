//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Model returned an unusable filename: {0:?}")]
    EmptySuggestion(String),

    #[error("Invalid task transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[cfg(feature = "archive")]
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
