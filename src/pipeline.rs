//! 列挙済みファイルを1枚ずつ 解析 → リネーム する逐次パイプライン

use crate::analyzer::NameSuggester;
use crate::error::Result;
use crate::renamer::{self, WriteMode};
use image_labeler_common::{sanitize_suggestion, ImageTask, TaskStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// API呼び出し間の既定の待ち時間（レート制限対策）
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dry_run: bool,
    pub verbose: bool,
    pub mode: WriteMode,
    pub delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verbose: false,
            mode: WriteMode::Rename,
            delay: DEFAULT_DELAY,
        }
    }
}

/// 実行結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub renamed: usize,
    /// 提案名が現在の名前と同じだった
    pub unchanged: usize,
    /// ドライランで解析のみ行った
    pub planned: usize,
    pub failed: usize,
}

impl RunSummary {
    fn from_tasks(tasks: &[ImageTask<PathBuf>], unchanged: usize) -> Self {
        let count = |status| tasks.iter().filter(|t| t.status() == status).count();
        Self {
            found: tasks.len(),
            renamed: count(TaskStatus::Renamed) - unchanged,
            unchanged,
            planned: count(TaskStatus::Analyzed),
            failed: count(TaskStatus::Failed),
        }
    }
}

/// 1枚分の結果
enum Outcome {
    Renamed,
    Unchanged,
    Planned,
}

/// 解析器と実行オプションをまとめたパイプライン
pub struct Labeler<S> {
    suggester: S,
    options: RunOptions,
}

impl<S: NameSuggester> Labeler<S> {
    pub fn new(suggester: S, options: RunOptions) -> Self {
        Self { suggester, options }
    }

    /// 列挙順に1枚ずつ処理する
    ///
    /// 画像単位のエラーはそのタスクを Failed にして次へ進む。
    /// APIキーの拒否など実行全体に関わるエラーのみ `Err` で中断する。
    pub async fn run(&self, files: Vec<PathBuf>) -> Result<(Vec<ImageTask<PathBuf>>, RunSummary)> {
        let total = files.len();
        let mut tasks: Vec<ImageTask<PathBuf>> = files
            .into_iter()
            .map(|path| {
                let name = display_name(&path);
                ImageTask::new(path, name)
            })
            .collect();

        let progress = (!self.options.verbose && total > 1).then(|| progress_bar(total));
        let mut unchanged = 0;

        for (i, task) in tasks.iter_mut().enumerate() {
            if self.options.verbose {
                println!("Processing {}/{}: {}", i + 1, total, task.source.display());
            }

            match self.process_one(task, progress.as_ref()).await {
                Ok(Outcome::Unchanged) => unchanged += 1,
                Ok(_) => {}
                Err(e) if e.is_fatal() => {
                    if let Some(pb) = &progress {
                        pb.abandon();
                    }
                    return Err(e);
                }
                Err(e) => {
                    log::warn!("{}: {}", task.source.display(), e);
                    report(
                        progress.as_ref(),
                        format!("✖ Error processing {}: {}", task.source.display(), e),
                    );
                    let _ = task.mark_failed(e.to_string());
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }

            if i + 1 < total && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let summary = RunSummary::from_tasks(&tasks, unchanged);
        Ok((tasks, summary))
    }

    async fn process_one(&self, task: &mut ImageTask<PathBuf>, progress: Option<&ProgressBar>) -> Result<Outcome> {
        report(progress, format!("Analyzing: {}", task.original_name));

        let bytes = tokio::fs::read(&task.source).await?;
        let raw = self.suggester.suggest_name(&bytes, &task.mime_type).await?;
        let base = sanitize_suggestion(&raw)?;
        if base != raw.trim() {
            log::debug!("sanitized {:?} -> {:?}", raw, base);
        }
        task.mark_analyzed(base)?;

        let mode = self.options.mode;
        let proposed = task
            .proposed_file_name(mode.target_extension())
            .unwrap_or_default();
        let plan = renamer::plan_rename(&task.source, &proposed, mode, timestamp_millis());

        let webp_note = if mode == WriteMode::ConvertToWebp { " (WebP)" } else { "" };
        let conflict_note = if plan.disambiguated {
            " (added timestamp to avoid conflict)"
        } else {
            ""
        };

        if self.options.dry_run {
            let verb = match mode {
                WriteMode::Rename => "Would rename",
                WriteMode::ConvertToWebp => "Would convert & rename",
            };
            report(
                progress,
                format!("{}: {} → {}{}{}", verb, plan.source_name(), plan.target_name(), webp_note, conflict_note),
            );
            return Ok(Outcome::Planned);
        }

        if plan.is_noop() {
            report(progress, format!("Unchanged: {} already has the suggested name", plan.source_name()));
            task.mark_renamed(plan.target_name())?;
            return Ok(Outcome::Unchanged);
        }

        renamer::apply(&plan)?;
        task.mark_renamed(plan.target_name())?;

        let verb = match mode {
            WriteMode::Rename => "Renamed",
            WriteMode::ConvertToWebp => "Converted & renamed",
        };
        report(
            progress,
            format!("✔ {}: {} → {}{}{}", verb, plan.source_name(), plan.target_name(), webp_note, conflict_note),
        );
        Ok(Outcome::Renamed)
    }
}

/// APIキーなしのドライラン: 解析対象の一覧のみ表示する
pub fn preview(files: &[PathBuf], options: &RunOptions) -> RunSummary {
    for file in files {
        match options.mode {
            WriteMode::Rename => println!("Would analyze: {}", display_name(file)),
            WriteMode::ConvertToWebp => println!("Would analyze & convert: {} → WebP", display_name(file)),
        }
        println!("Full path: {}", file.display());
        println!();
    }

    RunSummary {
        found: files.len(),
        ..Default::default()
    }
}

fn report(progress: Option<&ProgressBar>, line: String) {
    match progress {
        Some(pb) => pb.println(line),
        None => println!("{}", line),
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed}] [{bar:40.cyan/blue}] {pos}/{len}") {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn timestamp_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
