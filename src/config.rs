use crate::error::{LabelerError, Result};
use std::path::{Path, PathBuf};

/// ホームディレクトリ直下の設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".image-labeler-config";

/// 設定ファイルのキー兼環境変数名
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// APIキーの保存先
///
/// 書式は `GEMINI_API_KEY=<value>` の1行のみ。他の行は無視する。
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.image-labeler-config`
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| LabelerError::Config("home directory not found".into()))?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みのAPIキーを読む。ファイルがなければ `None`
    pub fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_api_key(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 環境変数を優先してAPIキーを解決する
    pub fn resolve(&self, env_value: Option<String>) -> Result<Option<String>> {
        if let Some(key) = env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            log::debug!("using API key from ${}", API_KEY_VAR);
            return Ok(Some(key));
        }
        self.load()
    }

    /// APIキーを保存（既存の内容は上書き）
    pub fn save(&self, api_key: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LabelerError::Config("API key must not be empty".into()));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, format!("{}={}\n", API_KEY_VAR, api_key))?;
        log::debug!("saved API key to {}", self.path.display());
        Ok(())
    }
}

/// 設定ファイルの内容から `GEMINI_API_KEY=` 行の値を取り出す
pub fn parse_api_key(content: &str) -> Option<String> {
    let prefix = format!("{}=", API_KEY_VAR);
    content
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
