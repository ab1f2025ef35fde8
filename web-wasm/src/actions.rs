//! ボタン操作ごとの処理（解析・ダウンロード・ZIP）

use crate::api::gemini;
use crate::app::{AppState, ImageEntry, Progress};
use crate::download;
use gloo::dialogs::alert;
use gloo::timers::future::TimeoutFuture;
use image_labeler_common::{archive_name, build_zip, ImageTask, TaskStatus, DEFAULT_MODEL};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

/// 一括解析の間隔（レート制限対策）
const ANALYZE_DELAY_MS: u32 = 1000;
/// 一括ダウンロードの間隔
const DOWNLOAD_DELAY_MS: u32 = 500;

/// 選択されたファイルで一覧を置き換える
///
/// `image/` 以外は除外。読み込みは選択順に逐次行う。
pub fn replace_images(state: AppState, files: Vec<web_sys::File>) {
    let files: Vec<web_sys::File> = files
        .into_iter()
        .filter(|f| f.type_().starts_with("image/"))
        .collect();

    if files.is_empty() {
        alert("No image files selected");
        return;
    }

    clear(state);
    let generation = state.generation.get_untracked();

    spawn_local(async move {
        for (index, file) in files.into_iter().enumerate() {
            let name = file.name();
            let mime_type = file.type_();
            let preview_url = download::preview_url(&file).unwrap_or_default();

            let blob = gloo::file::Blob::from(web_sys::Blob::from(file));
            let bytes = match gloo::file::futures::read_as_bytes(&blob).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    leptos::logging::warn!("failed to read {}: {}", name, e);
                    download::revoke_preview(&preview_url);
                    continue;
                }
            };

            // 読み込み中に別の選択やクリアがあった
            if state.generation.get_untracked() != generation {
                download::revoke_preview(&preview_url);
                return;
            }

            let task = ImageTask::with_mime(Arc::<[u8]>::from(bytes), name, mime_type);
            let entry = ImageEntry::new(index as u32, task, preview_url);
            state.set_images.update(|images| images.push(entry));
        }
    });
}

/// 1枚を解析（Analyze / Re-analyze）
pub async fn analyze_one(state: AppState, id: u32) {
    let Some(api_key) = state.saved_key.get_untracked() else {
        alert("Please save your API key first");
        return;
    };

    if let Err(e) = analyze_entry(state, &api_key, id).await {
        leptos::logging::error!("analysis failed: {}", e);
        alert("Error analyzing image. Please check your API key and try again.");
    }
}

/// 全画像を順に解析する
pub async fn analyze_all(state: AppState) {
    let Some(api_key) = state.saved_key.get_untracked() else {
        alert("Please save your API key first");
        return;
    };

    // リネーム済みは再解析しない
    let ids: Vec<u32> = state.images.with_untracked(|images| {
        images
            .iter()
            .filter(|e| e.task.status() != TaskStatus::Renamed)
            .map(|e| e.id)
            .collect()
    });
    if ids.is_empty() {
        return;
    }

    state.set_is_running.set(true);
    let total = ids.len();
    let mut failed = 0;

    for (i, id) in ids.into_iter().enumerate() {
        state.set_progress.set(Some(Progress {
            fraction: i as f32 / total as f32,
            label: format!("Processing image {} of {}", i + 1, total),
        }));

        if let Err(e) = analyze_entry(state, &api_key, id).await {
            leptos::logging::warn!("analysis failed for image {}: {}", id, e);
            failed += 1;
        }

        if i + 1 < total {
            TimeoutFuture::new(ANALYZE_DELAY_MS).await;
        }
    }

    state.set_progress.set(None);
    state.set_is_running.set(false);

    if failed == 0 {
        alert("All images analyzed!");
    } else {
        alert(&format!("All images analyzed! {} image(s) could not be analyzed.", failed));
    }
}

async fn analyze_entry(state: AppState, api_key: &str, id: u32) -> Result<(), String> {
    let entry = state.entry(id).ok_or_else(|| format!("image {} not found", id))?;
    if entry.task.status() == TaskStatus::Renamed {
        return Err(format!("{} is already renamed", entry.task.original_name));
    }

    state.update_entry(id, |e| {
        e.busy = true;
        e.last_error = None;
    });

    let result = gemini::suggest_name(api_key, DEFAULT_MODEL, &entry.task.source, &entry.task.mime_type)
        .await
        .map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)));

    let mut outcome = Ok(());
    state.update_entry(id, |e| {
        e.busy = false;
        outcome = match result {
            Ok(name) => e.task.mark_analyzed(name).map_err(|err| err.to_string()),
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            e.last_error = Some(err.clone());
        }
    });
    outcome
}

/// 1枚を提案名でダウンロード（Rename）
pub fn rename_one(state: AppState, id: u32) {
    let Some(entry) = state.entry(id).filter(ImageEntry::has_suggestion) else {
        alert("Please analyze the image first");
        return;
    };

    match download_entry(state, &entry) {
        Ok(name) => alert(&format!("Image will be downloaded as: {}", name)),
        Err(e) => {
            leptos::logging::error!("error renaming image: {}", e);
            alert("Error renaming image");
        }
    }
}

/// 解析済みの全画像を順にダウンロード（Rename all）
pub async fn rename_all(state: AppState) {
    let entries = analyzed_entries(state);
    if entries.is_empty() {
        alert("No analyzed images to rename");
        return;
    }

    state.set_is_running.set(true);
    let total = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        if let Err(e) = download_entry(state, entry) {
            leptos::logging::error!("error renaming {}: {}", entry.task.original_name, e);
        }
        if i + 1 < total {
            TimeoutFuture::new(DOWNLOAD_DELAY_MS).await;
        }
    }
    state.set_is_running.set(false);

    alert(&format!("{} images will be downloaded with new names", total));
}

/// 解析済みの全画像をZIPにまとめてダウンロード
pub async fn download_zip(state: AppState) {
    let entries = analyzed_entries(state);
    if entries.is_empty() {
        alert("No analyzed images to download");
        return;
    }

    state.set_is_running.set(true);
    state.set_progress.set(Some(Progress {
        fraction: 0.0,
        label: "Creating ZIP file...".into(),
    }));
    // 進捗表示を描画させてから同期処理に入る
    TimeoutFuture::new(0).await;

    let result = build_and_download_zip(&entries);

    state.set_progress.set(None);
    state.set_is_running.set(false);

    match result {
        Ok(zip_name) => alert(&format!(
            "ZIP file \"{}\" created with {} renamed images",
            zip_name,
            entries.len()
        )),
        Err(e) => {
            leptos::logging::error!("error creating ZIP file: {}", e);
            alert("Error creating ZIP file. Please try again.");
        }
    }
}

fn build_and_download_zip(entries: &[ImageEntry]) -> Result<String, String> {
    let names: Vec<String> = entries
        .iter()
        .map(|e| e.download_name().unwrap_or_else(|| e.task.original_name.clone()))
        .collect();
    let files = names
        .iter()
        .zip(entries)
        .map(|(name, e)| (name.as_str(), &e.task.source[..]));

    let (bytes, _) = build_zip(files, js_sys::Date::now() as u64).map_err(|e| e.to_string())?;

    let iso = js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default();
    let zip_name = archive_name(&iso);
    download::download_bytes(&bytes, &zip_name, "application/zip").map_err(|e| format!("{:?}", e))?;
    Ok(zip_name)
}

/// ダウンロードを起動し、未リネームならRenamedにする
fn download_entry(state: AppState, entry: &ImageEntry) -> Result<String, String> {
    let name = entry
        .download_name()
        .ok_or_else(|| format!("{} has no suggested name", entry.task.original_name))?;

    download::download_bytes(&entry.task.source, &name, &entry.task.mime_type).map_err(|e| format!("{:?}", e))?;

    if entry.task.status() == TaskStatus::Analyzed {
        let final_name = name.clone();
        state.update_entry(entry.id, move |e| {
            if let Err(err) = e.task.mark_renamed(final_name) {
                leptos::logging::warn!("{}", err);
            }
        });
    }
    Ok(name)
}

fn analyzed_entries(state: AppState) -> Vec<ImageEntry> {
    state
        .images
        .with_untracked(|images| images.iter().filter(|e| e.has_suggestion()).cloned().collect())
}

/// 一覧を空にしてプレビューURLを解放する
pub fn clear(state: AppState) {
    state.set_generation.update(|g| *g = g.wrapping_add(1));
    let old = state.images.with_untracked(|images| {
        images.iter().map(|e| e.preview_url.clone()).collect::<Vec<_>>()
    });
    for url in old {
        download::revoke_preview(&url);
    }
    state.set_images.set(Vec::new());
    state.set_progress.set(None);
}
