use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("API key not found. Please set it first using: image-labeler config --api-key YOUR_KEY")]
    MissingApiKey,

    #[error("API key rejected by the model provider: {0}")]
    InvalidApiKey(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a supported image file: {0}")]
    UnsupportedFile(String),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("API call failed: {0}")]
    ApiCall(String),

    #[error("API returned HTTP {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] image_labeler_common::Error),
}

impl LabelerError {
    /// 実行全体を中断すべきエラーか（画像単位のエラーは継続）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LabelerError::Config(_)
                | LabelerError::MissingApiKey
                | LabelerError::InvalidApiKey(_)
                | LabelerError::Pattern(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LabelerError>;
