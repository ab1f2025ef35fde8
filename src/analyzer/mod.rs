//! 画像 → 提案ファイル名
//!
//! モデル呼び出しは `NameSuggester` の背後に置き、テストではモックに差し替える。

mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockSuggester;

use crate::error::Result;

/// 画像を受け取り、モデルが返したファイル名テキストをそのまま返す
///
/// 整形（`sanitize_suggestion`）は呼び出し側のパイプラインで行う。
#[allow(async_fn_in_trait)]
pub trait NameSuggester {
    async fn suggest_name(&self, image: &[u8], mime_type: &str) -> Result<String>;
}

impl<T: NameSuggester> NameSuggester for &T {
    async fn suggest_name(&self, image: &[u8], mime_type: &str) -> Result<String> {
        (**self).suggest_name(image, mime_type).await
    }
}
