//! 対応画像形式とMIMEタイプ

/// 対応拡張子（列挙順はディレクトリ展開の順序でもある）
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// 未対応拡張子のフォールバック
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 拡張子からMIMEタイプを返す
///
/// 大文字小文字は区別しない。先頭の `.` は無視する。
/// 未対応の拡張子は失敗せず `image/jpeg` を返す。
///
/// # Examples
/// ```
/// use image_labeler_common::mime_for_extension;
///
/// assert_eq!(mime_for_extension("PNG"), "image/png");
/// assert_eq!(mime_for_extension(".tiff"), "image/jpeg");
/// ```
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// ファイル名からMIMEタイプを返す（拡張子なしはフォールバック）
pub fn mime_for_name(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => mime_for_extension(ext),
        None => DEFAULT_MIME_TYPE,
    }
}

/// 対応拡張子かどうか
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_supported_extensions() {
        assert_eq!(mime_for_extension("jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("jpeg"), "image/jpeg");
        assert_eq!(mime_for_extension("png"), "image/png");
        assert_eq!(mime_for_extension("gif"), "image/gif");
        assert_eq!(mime_for_extension("webp"), "image/webp");
        assert_eq!(mime_for_extension("bmp"), "image/bmp");
    }

    #[test]
    fn test_mime_is_case_insensitive() {
        assert_eq!(mime_for_extension("JPG"), "image/jpeg");
        assert_eq!(mime_for_extension(".WebP"), "image/webp");
    }

    #[test]
    fn test_mime_fallback_is_total() {
        for ext in ["tiff", "heic", "", "txt", "."] {
            assert_eq!(mime_for_extension(ext), DEFAULT_MIME_TYPE, "ext: {:?}", ext);
        }
    }

    #[test]
    fn test_every_supported_extension_has_specific_mime() {
        for ext in SUPPORTED_EXTENSIONS {
            assert!(mime_for_extension(ext).starts_with("image/"));
            assert!(is_supported_extension(ext));
        }
    }

    #[test]
    fn test_mime_for_name() {
        assert_eq!(mime_for_name("holiday.photo.PNG"), "image/png");
        assert_eq!(mime_for_name("README"), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_is_supported_extension() {
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension(".bmp"));
        assert!(!is_supported_extension("txt"));
        assert!(!is_supported_extension("tif"));
    }
}
