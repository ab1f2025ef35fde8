//! 画像タスクと状態遷移
//!
//! Pending → Analyzed → Renamed の順にのみ進む。
//! Failed は終端で、以降の処理ではスキップされる。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::media::mime_for_name;
use crate::naming::{final_file_name, split_extension};

/// タスクの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Analyzed,
    Renamed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Analyzed => "analyzed",
            TaskStatus::Renamed => "renamed",
            TaskStatus::Failed => "failed",
        }
    }

    /// これ以上遷移しない状態か
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Renamed | TaskStatus::Failed)
    }
}

/// 1枚の画像の処理状態
///
/// `S` はホストごとの画像ハンドル（CLI: パス / Web: メモリ上のバイト列）
#[derive(Debug, Clone)]
pub struct ImageTask<S> {
    pub source: S,
    pub original_name: String,
    pub mime_type: String,
    suggested_name: Option<String>,
    final_name: Option<String>,
    error: Option<String>,
    status: TaskStatus,
}

impl<S> ImageTask<S> {
    /// ファイル名からMIMEタイプを推定して作成
    pub fn new(source: S, original_name: impl Into<String>) -> Self {
        let original_name = original_name.into();
        let mime_type = mime_for_name(&original_name).to_string();
        Self::with_mime(source, original_name, mime_type)
    }

    /// MIMEタイプを指定して作成（ブラウザのFile.typeなど）
    pub fn with_mime(source: S, original_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            source,
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            suggested_name: None,
            final_name: None,
            error: None,
            status: TaskStatus::Pending,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn suggested_name(&self) -> Option<&str> {
        self.suggested_name.as_deref()
    }

    pub fn final_name(&self) -> Option<&str> {
        self.final_name.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 元ファイルの拡張子（大文字小文字は保持）
    pub fn original_extension(&self) -> Option<&str> {
        split_extension(&self.original_name).1
    }

    /// 提案名 + 拡張子
    ///
    /// `target_ext` が指定されれば変換後の拡張子、なければ元の拡張子を使う。
    pub fn proposed_file_name(&self, target_ext: Option<&str>) -> Option<String> {
        let base = self.suggested_name.as_deref()?;
        Some(final_file_name(base, target_ext.or_else(|| self.original_extension())))
    }

    /// 解析完了。Analyzed からの再解析は提案名を置き換える
    pub fn mark_analyzed(&mut self, suggested_name: impl Into<String>) -> Result<()> {
        match self.status {
            TaskStatus::Pending | TaskStatus::Analyzed => {
                self.suggested_name = Some(suggested_name.into());
                self.status = TaskStatus::Analyzed;
                Ok(())
            }
            other => Err(transition_error(other, TaskStatus::Analyzed)),
        }
    }

    /// リネーム完了。解析前には遷移できない
    pub fn mark_renamed(&mut self, final_name: impl Into<String>) -> Result<()> {
        match self.status {
            TaskStatus::Analyzed => {
                self.final_name = Some(final_name.into());
                self.status = TaskStatus::Renamed;
                Ok(())
            }
            other => Err(transition_error(other, TaskStatus::Renamed)),
        }
    }

    /// 失敗として記録（終端）
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> Result<()> {
        if self.status.is_terminal() {
            return Err(transition_error(self.status, TaskStatus::Failed));
        }
        self.error = Some(reason.into());
        self.status = TaskStatus::Failed;
        Ok(())
    }
}

fn transition_error(from: TaskStatus, to: TaskStatus) -> Error {
    Error::InvalidTransition {
        from: from.as_str(),
        to: to.as_str(),
    }
}
