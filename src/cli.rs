use clap::{Parser, Subcommand};
use image_labeler_common::DEFAULT_MODEL;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-labeler")]
#[command(about = "AIで画像の内容を解析し、説明的なファイル名に変更するツール", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 使用するGeminiモデル
    #[arg(long, default_value = DEFAULT_MODEL, global = true)]
    pub model: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// APIキーを保存 / 設定状態を表示
    Config {
        /// Gemini APIキー
        #[arg(long)]
        api_key: Option<String>,
    },

    /// ファイル・フォルダ・globパターンに一致する画像をリネーム
    Rename {
        /// ファイル、フォルダ、またはglobパターン（例: "photos/*.jpg"）
        #[arg(required = true)]
        path: String,

        /// 変更せずに予定のみ表示
        #[arg(long)]
        dry_run: bool,

        /// WebPに変換して保存（元ファイルは削除）
        #[arg(long)]
        webp: bool,

        /// API呼び出し間の待ち時間（ミリ秒）
        #[arg(long, default_value = "1000")]
        delay_ms: u64,
    },

    /// 画像1枚をリネーム
    Single {
        /// 画像ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 変更せずに予定のみ表示
        #[arg(long)]
        dry_run: bool,

        /// WebPに変換して保存（元ファイルは削除）
        #[arg(long)]
        webp: bool,
    },
}
