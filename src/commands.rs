//! サブコマンドの実行本体
//!
//! `main.rs` から呼ばれる。出力はユーザー向けメッセージのみで、
//! 終了コードの決定は呼び出し側が行う。

use crate::analyzer::{GeminiClient, NameSuggester};
use crate::config::ConfigStore;
use crate::error::{LabelerError, Result};
use crate::pipeline::{self, Labeler, RunOptions, RunSummary};
use crate::scanner;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 1リクエストあたりのタイムアウト
pub const API_TIMEOUT: Duration = Duration::from_secs(60);

/// `config` サブコマンド
///
/// キーが渡されれば保存し、なければ現在の状態を表示する。
pub fn run_config(store: &ConfigStore, api_key: Option<String>) -> Result<()> {
    if let Some(key) = api_key {
        store.save(&key)?;
        println!("✔ API key saved successfully!");
        println!("Config file: {}", store.path().display());
        return Ok(());
    }

    match store.load()? {
        Some(key) => {
            println!("API key is configured ({})", mask_key(&key));
            println!("Config file: {}", store.path().display());
        }
        None => {
            println!("No API key configured.");
            println!("Set one with: image-labeler config --api-key YOUR_KEY");
        }
    }
    Ok(())
}

/// `rename` サブコマンド（ファイル / ディレクトリ / globパターン）
pub async fn run_rename(
    store: &ConfigStore,
    env_key: Option<String>,
    input: &str,
    model: &str,
    options: RunOptions,
) -> Result<RunSummary> {
    let api_key = require_key(store, env_key, &options)?;
    let files = scanner::collect_images(input)?;
    execute(api_key, files, model, options).await
}

/// `single` サブコマンド（1ファイルのみ）
pub async fn run_single(
    store: &ConfigStore,
    env_key: Option<String>,
    file: &Path,
    model: &str,
    options: RunOptions,
) -> Result<RunSummary> {
    let api_key = require_key(store, env_key, &options)?;
    let file = scanner::single_image(file)?;
    execute(api_key, vec![file], model, options).await
}

/// 任意の解析器でファイル列を処理する
pub async fn run_batch<S: NameSuggester>(suggester: S, files: Vec<PathBuf>, options: RunOptions) -> Result<RunSummary> {
    let labeler = Labeler::new(suggester, options);
    let (tasks, summary) = labeler.run(files).await?;

    for task in tasks.iter().filter(|t| t.error().is_some()) {
        log::debug!("failed: {} ({})", task.original_name, task.error().unwrap_or_default());
    }
    Ok(summary)
}

/// キーを解決する。ドライラン以外でキーがなければファイル列挙前にエラー
fn require_key(store: &ConfigStore, env_key: Option<String>, options: &RunOptions) -> Result<Option<String>> {
    let key = store.resolve(env_key)?;
    if key.is_none() && !options.dry_run {
        return Err(LabelerError::MissingApiKey);
    }
    Ok(key)
}

async fn execute(api_key: Option<String>, files: Vec<PathBuf>, model: &str, options: RunOptions) -> Result<RunSummary> {
    if files.is_empty() {
        println!("No image files found matching the pattern.");
        return Ok(RunSummary::default());
    }

    println!("Found {} image(s) to process...", files.len());
    if options.dry_run {
        println!("DRY RUN MODE - No files will be renamed");
    }
    println!();

    let dry_run = options.dry_run;
    let summary = match api_key {
        Some(key) => {
            let client = GeminiClient::new(key, model, API_TIMEOUT)?;
            log::debug!("using model {}", client.model());
            run_batch(client, files, options).await?
        }
        None => {
            println!("No API key configured, listing files only.\n");
            pipeline::preview(&files, &options)
        }
    };

    print_summary(&summary, dry_run);
    Ok(summary)
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!();
    if dry_run {
        println!("✔ Dry run complete: {} image(s) checked", summary.found);
        if summary.failed > 0 {
            println!("  {} image(s) could not be analyzed", summary.failed);
        }
        return;
    }

    println!("✔ Processed {} image(s)", summary.found);
    println!("  renamed: {}", summary.renamed);
    if summary.unchanged > 0 {
        println!("  unchanged: {}", summary.unchanged);
    }
    if summary.failed > 0 {
        println!("  ✖ failed: {}", summary.failed);
    }
}

/// 末尾4文字以外を伏せる
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use tempfile::tempdir;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdefgh"), "****efgh");
        assert_eq!(mask_key("abc"), "***");
    }

    #[test]
    fn test_require_key_missing() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));

        let err = require_key(&store, None, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, LabelerError::MissingApiKey));
    }

    #[test]
    fn test_require_key_dry_run_allows_missing() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
        let options = RunOptions { dry_run: true, ..Default::default() };

        assert_eq!(require_key(&store, None, &options).unwrap(), None);
    }

    #[test]
    fn test_run_config_saves_key() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));

        run_config(&store, Some("new-key".into())).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("new-key"));
        run_config(&store, None).unwrap();
    }
}
