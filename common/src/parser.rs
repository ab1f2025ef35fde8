//! モデル出力のファイル名化
//!
//! モデルはプロンプトの指示（20〜100文字、アンダースコア区切り）を
//! 守るとは限らないため、ファイル名として使う前に整形する。

use crate::error::{Error, Result};
use crate::media::is_supported_extension;

/// ベース名の最大文字数
pub const MAX_NAME_CHARS: usize = 100;

/// ベース名の最大バイト数（UTF-8）
///
/// ファイル名の上限は255バイト。`_<13桁>_<n>.webp` を付けても収まる長さ。
pub const MAX_NAME_BYTES: usize = 200;

const UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// モデルの応答テキストをベース名に整形する
///
/// 1. 最初の空でない行のみ使用
/// 2. 前後の引用符・バッククォートを除去
/// 3. 付いてしまった画像拡張子を除去
/// 4. 空白と危険な文字を `_` に置換し、連続する `_` をまとめる
/// 5. 先頭末尾の `_` `.` `-` を除去し、100文字かつ200バイト以内に切り詰め
///
/// 結果が空ならエラー
///
/// # Examples
/// ```
/// use image_labeler_common::sanitize_suggestion;
///
/// let name = sanitize_suggestion("\"Red sunset over mountains.png\"").unwrap();
/// assert_eq!(name, "Red_sunset_over_mountains");
/// ```
pub fn sanitize_suggestion(raw: &str) -> Result<String> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let unquoted = line.trim_matches(|c| matches!(c, '"' | '\'' | '`')).trim();
    let stem = strip_image_extension(unquoted);

    let mut name = String::with_capacity(stem.len());
    for c in stem.chars() {
        let mapped = if c.is_whitespace() || c.is_control() || UNSAFE_CHARS.contains(&c) {
            '_'
        } else {
            c
        };
        if mapped == '_' && name.ends_with('_') {
            continue;
        }
        name.push(mapped);
    }

    let trimmed = name.trim_matches(|c| matches!(c, '_' | '.' | '-'));
    let mut clamped = String::with_capacity(trimmed.len().min(MAX_NAME_BYTES));
    for c in trimmed.chars().take(MAX_NAME_CHARS) {
        if clamped.len() + c.len_utf8() > MAX_NAME_BYTES {
            break;
        }
        clamped.push(c);
    }
    let clamped = clamped.trim_end_matches(|c| matches!(c, '_' | '.' | '-')).to_string();

    if clamped.is_empty() {
        return Err(Error::EmptySuggestion(raw.to_string()));
    }
    Ok(clamped)
}

fn strip_image_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if is_supported_extension(ext) && !stem.is_empty() => stem,
        _ => name,
    }
}
