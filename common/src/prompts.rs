//! プロンプト定義
//!
//! CLIとWeb(WASM)で同一のプロンプトを使う

/// 既定のGeminiモデル
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// ファイル名提案プロンプト（20〜100文字、アンダースコア区切り）
pub const RENAME_PROMPT: &str = "Analyze this image and suggest a descriptive filename. \
The filename should be detailed and descriptive, explaining what's in the image, the setting, \
colors, objects, people, actions, etc. Make it clear where this image would be useful. \
Return only the filename without extension, use underscores instead of spaces, and make it \
between 20-100 characters. Be very descriptive but concise.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_length_hint() {
        assert!(RENAME_PROMPT.contains("between 20-100 characters"));
        assert!(RENAME_PROMPT.contains("use underscores instead of spaces"));
        assert!(RENAME_PROMPT.contains("without extension"));
    }

    #[test]
    fn test_prompt_has_single_spaces() {
        assert!(!RENAME_PROMPT.contains("  "));
        assert!(!RENAME_PROMPT.contains('\n'));
    }
}
