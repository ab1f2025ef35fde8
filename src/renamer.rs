//! リネーム / WebP変換
//!
//! 1タスクにつき「リネーム1回」または「書き込み1回 + 削除1回」のみ行う。

use crate::error::{LabelerError, Result};
use image::{DynamicImage, ImageFormat};
use image_labeler_common::disambiguate;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 書き込みモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// ファイル名のみ変更
    #[default]
    Rename,
    /// WebPに再エンコードして新しい名前で保存し、元ファイルを削除
    ConvertToWebp,
}

impl WriteMode {
    pub fn from_webp_flag(webp: bool) -> Self {
        if webp {
            WriteMode::ConvertToWebp
        } else {
            WriteMode::Rename
        }
    }

    /// 変換後の拡張子（リネームのみなら元の拡張子を使う）
    pub fn target_extension(&self) -> Option<&'static str> {
        match self {
            WriteMode::Rename => None,
            WriteMode::ConvertToWebp => Some("webp"),
        }
    }
}

/// 実行予定のリネーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source: PathBuf,
    pub target: PathBuf,
    pub mode: WriteMode,
    /// 衝突回避のためタイムスタンプを付けたか
    pub disambiguated: bool,
}

impl RenamePlan {
    pub fn source_name(&self) -> String {
        file_name_of(&self.source)
    }

    pub fn target_name(&self) -> String {
        file_name_of(&self.target)
    }

    /// 現在の名前と同じ（何もしない）
    pub fn is_noop(&self) -> bool {
        self.mode == WriteMode::Rename && self.source == self.target
    }
}

/// 同じディレクトリ内で衝突しない移動先を決める
///
/// リネームモードでは元ファイル自身は衝突とみなさない。
/// 変換モードでは元ファイルを上書きしないよう衝突とみなす。
pub fn plan_rename(source: &Path, proposed_name: &str, mode: WriteMode, stamp: u64) -> RenamePlan {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));

    let is_taken = |name: &str| {
        let candidate = dir.join(name);
        if mode == WriteMode::Rename && candidate == source {
            return false;
        }
        path_exists(&candidate)
    };

    let name = disambiguate(proposed_name, stamp, is_taken);

    RenamePlan {
        source: source.to_path_buf(),
        target: dir.join(&name),
        mode,
        disambiguated: name != proposed_name,
    }
}

/// 計画を実行する
pub fn apply(plan: &RenamePlan) -> Result<()> {
    if plan.is_noop() {
        return Ok(());
    }

    match plan.mode {
        WriteMode::Rename => {
            // 計画後に作られたファイルも上書きしない
            if path_exists(&plan.target) {
                return Err(already_exists(&plan.target).into());
            }
            fs::rename(&plan.source, &plan.target)?;
        }
        WriteMode::ConvertToWebp => convert_then_remove(plan, |p: &Path| fs::remove_file(p))?,
    }

    Ok(())
}

/// 変換して元ファイルを削除する
///
/// 削除に失敗したら書いたファイルを消し、元ファイルだけが残る状態に戻す。
fn convert_then_remove<F>(plan: &RenamePlan, remove_source: F) -> Result<()>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    convert_to_webp(&plan.source, &plan.target)?;
    if let Err(e) = remove_source(&plan.source) {
        let _ = fs::remove_file(&plan.target);
        return Err(e.into());
    }
    Ok(())
}

fn convert_to_webp(source: &Path, target: &Path) -> Result<()> {
    let img = image::open(source)?;
    // WebPエンコーダはRGB8/RGBA8のみ対応
    let img = if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    };

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;

    let written = {
        let mut writer = BufWriter::new(file);
        img.write_to(&mut writer, ImageFormat::WebP)
            .map_err(LabelerError::from)
            .and_then(|_| writer.flush().map_err(Into::into))
    };

    if let Err(e) = written {
        // 書きかけのファイルを残さない
        let _ = fs::remove_file(target);
        return Err(e);
    }
    Ok(())
}

fn path_exists(path: &Path) -> bool {
    // 壊れたシンボリックリンクも「存在する」とみなす
    fs::symlink_metadata(path).is_ok()
}

fn already_exists(path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("{} already exists", path.display()),
    )
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
