//! Image Labeler Common Library
//!
//! CLIとWeb(WASM)で共有されるパイプライン部品:
//! 対応形式の判定、プロンプト、Gemini API型、命名規則、タスク状態

pub mod error;
pub mod media;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod naming;
pub mod task;
#[cfg(feature = "archive")]
pub mod archive;

pub use error::{Error, Result};
pub use media::{
    is_supported_extension, mime_for_extension, mime_for_name, DEFAULT_MIME_TYPE, SUPPORTED_EXTENSIONS,
};
pub use prompts::{RENAME_PROMPT, DEFAULT_MODEL};
pub use gemini::{
    build_rename_request, extract_text, extract_text_from_json, generate_content_url, GeminiRequest,
    GeminiResponse,
};
pub use parser::{sanitize_suggestion, MAX_NAME_BYTES, MAX_NAME_CHARS};
pub use naming::{disambiguate, final_file_name, split_extension};
pub use task::{ImageTask, TaskStatus};
#[cfg(feature = "archive")]
pub use archive::{archive_name, build_zip};
