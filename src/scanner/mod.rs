//! 入力パス（ファイル / ディレクトリ / globパターン）から画像ファイルを列挙する

use crate::error::{LabelerError, Result};
use image_labeler_common::{is_supported_extension, SUPPORTED_EXTENSIONS};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 入力を画像ファイルの順序付きリストに展開する
///
/// - 既存ファイルはそれ自身
/// - ディレクトリは直下のみ、拡張子ごと（jpg, jpeg, png, gif, webp, bmp の順）に列挙
/// - 存在しないパスが `*` `?` `[` を含めばglobとして展開
///
/// `[2023] trip.jpg` のように角括弧を含む実在パスはglobより優先する。
///
/// 対応拡張子以外は除外し、重複は最初の出現のみ残す。
/// 該当なしは空のVec（エラーではない）。
pub fn collect_images(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    let candidates = if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        scan_directory(path)
    } else if is_glob(input) {
        expand_glob(input)?
    } else {
        return Err(LabelerError::PathNotFound(input.to_string()));
    };

    Ok(dedup(
        candidates
            .into_iter()
            .filter(|p| is_supported_path(p))
            .collect(),
    ))
}

/// `single` コマンド用: 既存の対応画像ファイルであることを確認する
pub fn single_image(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(LabelerError::PathNotFound(path.display().to_string()));
    }
    if !is_supported_path(path) {
        return Err(LabelerError::UnsupportedFile(path.display().to_string()));
    }
    Ok(path.to_path_buf())
}

/// 対応拡張子のファイルか
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_supported_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

fn is_glob(input: &str) -> bool {
    input.chars().any(|c| matches!(c, '*' | '?' | '['))
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("skipping unreadable path: {}", e),
        }
    }
    Ok(files)
}

fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    let mut ordered = Vec::with_capacity(files.len());
    for ext in SUPPORTED_EXTENSIONS {
        let mut group: Vec<&PathBuf> = files
            .iter()
            .filter(|p| {
                p.extension()
                    .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
                    .unwrap_or(false)
            })
            .collect();
        group.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        ordered.extend(group.into_iter().cloned());
    }
    ordered
}

fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
