//! パイプライン統合テスト
//!
//! モック解析器で 列挙 → 解析 → リネーム の一連の流れを検証

use image_labeler::analyzer::MockSuggester;
use image_labeler::commands;
use image_labeler::config::{ConfigStore, CONFIG_FILE_NAME};
use image_labeler::error::LabelerError;
use image_labeler::pipeline::{Labeler, RunOptions};
use image_labeler::renamer::WriteMode;
use image_labeler::scanner;
use image_labeler_common::TaskStatus;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn options() -> RunOptions {
    RunOptions {
        delay: Duration::ZERO,
        ..Default::default()
    }
}

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// フォルダ内の2枚を提案名にリネーム
#[tokio::test]
async fn test_rename_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), "a.png", b"png-a");
    write(dir.path(), "b.jpg", b"jpg-b");

    // 列挙順は拡張子グループ順（jpg → png）
    let files = scanner::collect_images(dir.path().to_str().unwrap()).unwrap();
    let mock = MockSuggester::with_names(["blue ocean wave", "red sunset over mountains"]);

    let (tasks, summary) = Labeler::new(&mock, options()).run(files).await.unwrap();

    assert_eq!(summary.found, 2);
    assert_eq!(summary.renamed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(file_names(dir.path()), vec!["blue_ocean_wave.jpg", "red_sunset_over_mountains.png"]);
    assert_eq!(fs::read(dir.path().join("red_sunset_over_mountains.png")).unwrap(), b"png-a");

    assert!(tasks.iter().all(|t| t.status() == TaskStatus::Renamed));
    assert_eq!(tasks[0].final_name(), Some("blue_ocean_wave.jpg"));
    assert_eq!(mock.mime_types(), vec!["image/jpeg", "image/png"]);
}

/// 既存ファイルと衝突したらタイムスタンプを付け、既存ファイルは変更しない
#[tokio::test]
async fn test_rename_collision_adds_timestamp() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = write(dir.path(), "a.png", b"new");
    write(dir.path(), "sunset.png", b"existing");

    let mock = MockSuggester::with_names(["sunset"]);
    let (tasks, summary) = Labeler::new(&mock, options()).run(vec![source.clone()]).await.unwrap();

    assert_eq!(summary.renamed, 1);
    assert!(!source.exists());
    assert_eq!(fs::read(dir.path().join("sunset.png")).unwrap(), b"existing");

    let final_name = tasks[0].final_name().unwrap();
    assert!(final_name.starts_with("sunset_"));
    assert!(final_name.ends_with(".png"));
    let stamp = &final_name["sunset_".len()..final_name.len() - ".png".len()];
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(fs::read(dir.path().join(final_name)).unwrap(), b"new");
}

/// WebP変換: 新しいファイルを書き、元ファイルを削除
#[tokio::test]
async fn test_convert_bmp_to_webp() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("scan.bmp");
    RgbImage::from_pixel(4, 4, Rgb([10, 120, 200])).save(&source).unwrap();

    let mock = MockSuggester::with_names(["blue tile"]);
    let opts = RunOptions {
        mode: WriteMode::ConvertToWebp,
        ..options()
    };
    let (_, summary) = Labeler::new(&mock, opts).run(vec![source.clone()]).await.unwrap();

    assert_eq!(summary.renamed, 1);
    assert!(!source.exists());
    assert_eq!(file_names(dir.path()), vec!["blue_tile.webp"]);
    assert_eq!(mock.mime_types(), vec!["image/bmp"]);
}

/// ドライランはファイルを一切変更しない
#[tokio::test]
async fn test_dry_run_does_not_touch_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = write(dir.path(), "a.png", b"a");
    let b = write(dir.path(), "b.jpg", b"b");

    let c = write(dir.path(), "c.gif", b"c");
    let d = write(dir.path(), "d.png", b"d");

    // 失敗・整形後に空になる応答を挟んでも何も変更しない
    let mock = MockSuggester::new([Some("first"), None, Some("\"...\""), Some("second")]);
    let opts = RunOptions {
        dry_run: true,
        mode: WriteMode::ConvertToWebp,
        ..options()
    };
    let (tasks, summary) = Labeler::new(&mock, opts).run(vec![a, b, c, d]).await.unwrap();

    assert_eq!(summary.planned, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.renamed, 0);
    assert_eq!(mock.calls(), 4);
    assert_eq!(file_names(dir.path()), vec!["a.png", "b.jpg", "c.gif", "d.png"]);
    assert_eq!(tasks[0].status(), TaskStatus::Analyzed);
    assert_eq!(tasks[1].status(), TaskStatus::Failed);
    assert_eq!(tasks[2].status(), TaskStatus::Failed);
    assert_eq!(tasks[3].status(), TaskStatus::Analyzed);
}

/// 長いマルチバイトの提案名でもファイル名の上限を超えない
#[tokio::test]
async fn test_long_multibyte_suggestion_is_renamed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = write(dir.path(), "a.png", b"a");

    let mock = MockSuggester::with_names(["日本の風景".repeat(40)]);
    let (tasks, summary) = Labeler::new(&mock, options()).run(vec![source.clone()]).await.unwrap();

    assert_eq!(summary.renamed, 1);
    assert_eq!(summary.failed, 0);
    assert!(!source.exists());

    let final_name = tasks[0].final_name().unwrap();
    assert!(final_name.len() <= 255);
    assert!(final_name.starts_with("日本の風景"));
    assert!(final_name.ends_with(".png"));
    assert_eq!(file_names(dir.path()), vec![final_name.to_string()]);
}

/// 1枚の失敗で止まらず次へ進む
#[tokio::test]
async fn test_item_failure_continues() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = write(dir.path(), "a.png", b"a");
    let b = write(dir.path(), "b.png", b"b");
    let c = write(dir.path(), "c.png", b"c");

    // 2枚目は整形後に空になる
    let mock = MockSuggester::new([None, Some("```\n\"\"\n```"), Some("calm lake")]);
    let (tasks, summary) = Labeler::new(&mock, options()).run(vec![a, b, c]).await.unwrap();

    assert_eq!(mock.calls(), 3);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.renamed, 1);
    assert_eq!(tasks[0].status(), TaskStatus::Failed);
    assert!(tasks[0].error().is_some());
    assert_eq!(tasks[1].status(), TaskStatus::Failed);
    assert_eq!(file_names(dir.path()), vec!["a.png", "b.png", "calm_lake.png"]);
}

/// 提案名が現在の名前と同じなら何もしない
#[tokio::test]
async fn test_same_name_is_unchanged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = write(dir.path(), "calm_lake.png", b"lake");

    let mock = MockSuggester::with_names(["calm lake"]);
    let (_, summary) = Labeler::new(&mock, options()).run(vec![source.clone()]).await.unwrap();

    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.renamed, 0);
    assert!(source.exists());
}

/// APIキー拒否は実行全体を中断する
#[tokio::test]
async fn test_invalid_key_aborts_run() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = write(dir.path(), "a.png", b"a");
    let b = write(dir.path(), "b.png", b"b");
    let c = write(dir.path(), "c.png", b"c");

    let mock = MockSuggester::with_names(["first", "second", "third"]).rejecting_key_from(1);
    let result = Labeler::new(&mock, options()).run(vec![a, b, c]).await;

    assert!(matches!(result, Err(LabelerError::InvalidApiKey(_))));
    assert_eq!(mock.calls(), 2);
    assert_eq!(file_names(dir.path()), vec!["b.png", "c.png", "first.png"]);
}

/// キー未設定ならファイル列挙前に失敗し、何も変更しない
#[tokio::test]
async fn test_missing_key_changes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    write(&images, "a.png", b"a");

    let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
    let result = commands::run_rename(&store, None, images.to_str().unwrap(), "gemini-2.0-flash", options()).await;

    assert!(matches!(result, Err(LabelerError::MissingApiKey)));
    assert_eq!(file_names(&images), vec!["a.png"]);
}

/// キーなしのドライランは一覧表示のみ
#[tokio::test]
async fn test_dry_run_without_key_lists_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    write(&images, "a.png", b"a");
    write(&images, "notes.txt", b"text");

    let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
    let opts = RunOptions {
        dry_run: true,
        ..options()
    };
    let summary = commands::run_rename(&store, None, images.to_str().unwrap(), "gemini-2.0-flash", opts)
        .await
        .unwrap();

    assert_eq!(summary.found, 1);
    assert_eq!(file_names(&images), vec!["a.png", "notes.txt"]);
}

/// 該当ファイルがなくてもエラーにならない
#[tokio::test]
async fn test_no_matches_is_ok() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
    let pattern = format!("{}/*.png", dir.path().display());

    let summary = commands::run_rename(&store, Some("key".into()), &pattern, "gemini-2.0-flash", options())
        .await
        .unwrap();
    assert_eq!(summary.found, 0);
}
