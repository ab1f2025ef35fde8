//! 最終ファイル名の決定
//!
//! 既存ファイルを上書きしないよう、衝突時はタイムスタンプを付与する。
//! 存在確認はホストに委ねる（CLI: ファイルシステム / Web: ZIP内の名前集合）。

/// ファイル名を (ベース名, 拡張子) に分割
///
/// 先頭ドットのみのファイル（`.hidden`）は拡張子なしとみなす。
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

/// 提案名に拡張子を付けて最終ファイル名にする
pub fn final_file_name(base: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{}.{}", base, ext),
        None => base.to_string(),
    }
}

/// 衝突しないファイル名を返す
///
/// `is_taken` が偽ならそのまま返す。真なら `<base>_<stamp>.<ext>` を試し、
/// それも使われていれば `<base>_<stamp>_<n>.<ext>` を空くまで試す。
///
/// # Examples
/// ```
/// use image_labeler_common::disambiguate;
///
/// let name = disambiguate("sunset.png", 1700000000000, |n| n == "sunset.png");
/// assert_eq!(name, "sunset_1700000000000.png");
/// ```
pub fn disambiguate<F>(file_name: &str, stamp: u64, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !is_taken(file_name) {
        return file_name.to_string();
    }

    let (stem, ext) = split_extension(file_name);
    let stamped = format!("{}_{}", stem, stamp);
    let candidate = final_file_name(&stamped, ext);
    if !is_taken(&candidate) {
        return candidate;
    }

    let mut counter = 1u32;
    loop {
        let candidate = final_file_name(&format!("{}_{}", stamped, counter), ext);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.png"), ("a", Some("png")));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", Some("gz")));
        assert_eq!(split_extension("README"), ("README", None));
        assert_eq!(split_extension(".hidden"), (".hidden", None));
        assert_eq!(split_extension("trailing."), ("trailing.", None));
    }

    #[test]
    fn test_final_file_name() {
        assert_eq!(final_file_name("red_sunset", Some("png")), "red_sunset.png");
        assert_eq!(final_file_name("red_sunset", Some("JPG")), "red_sunset.JPG");
        assert_eq!(final_file_name("red_sunset", None), "red_sunset");
    }

    #[test]
    fn test_no_collision_keeps_name() {
        let name = disambiguate("blue_ocean_wave.jpg", 42, |_| false);
        assert_eq!(name, "blue_ocean_wave.jpg");
    }

    #[test]
    fn test_collision_appends_stamp() {
        let taken: HashSet<&str> = ["red_sunset_over_mountains.png"].into_iter().collect();
        let name = disambiguate("red_sunset_over_mountains.png", 1234, |n| taken.contains(n));
        assert_eq!(name, "red_sunset_over_mountains_1234.png");
    }

    #[test]
    fn test_stamped_collision_appends_counter() {
        let taken: HashSet<&str> = ["x.png", "x_7.png", "x_7_1.png"].into_iter().collect();
        let name = disambiguate("x.png", 7, |n| taken.contains(n));
        assert_eq!(name, "x_7_2.png");
        assert!(!taken.contains(name.as_str()));
    }

    #[test]
    fn test_collision_without_extension() {
        let name = disambiguate("notes", 5, |n| n == "notes");
        assert_eq!(name, "notes_5");
    }

    #[test]
    fn test_result_is_never_taken() {
        let mut taken: HashSet<String> = HashSet::new();
        for _ in 0..20 {
            let name = disambiguate("dup.webp", 99, |n| taken.contains(n));
            assert!(taken.insert(name), "同じ名前が二度返された");
        }
        assert_eq!(taken.len(), 20);
    }
}
