//! メインアプリケーションコンポーネント

use crate::actions;
use crate::components::{
    controls::Controls, header::Header, image_grid::ImageGrid, progress_bar::ProgressBar,
    settings_panel::SettingsPanel, upload_area::UploadArea,
};
use crate::storage;
use image_labeler_common::{ImageTask, TaskStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

/// 画像カード1枚分の状態
///
/// バイト列は `Arc<[u8]>` で持ち、シグナルに載せられるようにする。
#[derive(Clone)]
pub struct ImageEntry {
    pub id: u32,
    pub task: ImageTask<Arc<[u8]>>,
    pub preview_url: String,
    /// 解析中
    pub busy: bool,
    /// 直近の解析エラー（再解析で消える）
    pub last_error: Option<String>,
}

impl ImageEntry {
    pub fn new(id: u32, task: ImageTask<Arc<[u8]>>, preview_url: String) -> Self {
        Self {
            id,
            task,
            preview_url,
            busy: false,
            last_error: None,
        }
    }

    /// 提案名が付いている（ダウンロード対象）
    pub fn has_suggestion(&self) -> bool {
        matches!(self.task.status(), TaskStatus::Analyzed | TaskStatus::Renamed)
    }

    /// ダウンロード時のファイル名（元の拡張子を付ける）
    pub fn download_name(&self) -> Option<String> {
        self.task
            .final_name()
            .map(str::to_string)
            .or_else(|| self.task.proposed_file_name(None))
    }

    /// カードに表示する提案名
    pub fn suggestion_label(&self) -> String {
        if self.busy {
            return "Analyzing...".into();
        }
        if self.last_error.is_some() {
            return "Error analyzing image".into();
        }
        self.task
            .suggested_name()
            .map(str::to_string)
            .unwrap_or_else(|| "Not analyzed".into())
    }
}

/// 一括処理の進捗表示
#[derive(Clone, Default, PartialEq)]
pub struct Progress {
    pub fraction: f32,
    pub label: String,
}

/// アプリ全体で共有するシグナル
#[derive(Clone, Copy)]
pub struct AppState {
    pub saved_key: ReadSignal<Option<String>>,
    pub images: ReadSignal<Vec<ImageEntry>>,
    pub set_images: WriteSignal<Vec<ImageEntry>>,
    pub progress: ReadSignal<Option<Progress>>,
    pub set_progress: WriteSignal<Option<Progress>>,
    pub is_running: ReadSignal<bool>,
    pub set_is_running: WriteSignal<bool>,
    /// ファイル選択ごとに進める。古い読み込みの結果を捨てるために使う
    pub generation: ReadSignal<u32>,
    pub set_generation: WriteSignal<u32>,
}

impl AppState {
    /// idのエントリを更新する
    pub fn update_entry(&self, id: u32, f: impl FnOnce(&mut ImageEntry)) {
        self.set_images.update(|images| {
            if let Some(entry) = images.iter_mut().find(|e| e.id == id) {
                f(entry);
            }
        });
    }

    pub fn entry(&self, id: u32) -> Option<ImageEntry> {
        self.images.with_untracked(|images| images.iter().find(|e| e.id == id).cloned())
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let initial_key = storage::load_api_key();
    let (api_key, set_api_key) = signal(initial_key.clone().unwrap_or_default());
    let (saved_key, set_saved_key) = signal(initial_key);
    let (images, set_images) = signal(Vec::<ImageEntry>::new());
    let (progress, set_progress) = signal(None::<Progress>);
    let (is_running, set_is_running) = signal(false);
    let (generation, set_generation) = signal(0u32);

    let state = AppState {
        saved_key,
        images,
        set_images,
        progress,
        set_progress,
        is_running,
        set_is_running,
        generation,
        set_generation,
    };

    // APIキー保存
    let on_save_key = move |_: ()| {
        let key = api_key.get_untracked();
        match storage::save_api_key(&key) {
            Ok(()) => {
                set_saved_key.set(Some(key.trim().to_string()));
                gloo::dialogs::alert("API key saved successfully!");
            }
            Err(e) => {
                leptos::logging::warn!("failed to save API key: {}", e);
                gloo::dialogs::alert("Please enter a valid API key");
            }
        }
    };

    // ファイル選択（一覧を置き換える）
    let on_files_selected = move |files: Vec<web_sys::File>| {
        actions::replace_images(state, files);
    };

    let on_analyze = move |id: u32| spawn_local(actions::analyze_one(state, id));
    let on_rename = move |id: u32| actions::rename_one(state, id);
    let on_analyze_all = move |_: ()| spawn_local(actions::analyze_all(state));
    let on_rename_all = move |_: ()| spawn_local(actions::rename_all(state));
    let on_download_zip = move |_: ()| spawn_local(actions::download_zip(state));
    let on_clear = move |_: ()| actions::clear(state);

    view! {
        <div class="container">
            <Header />

            <SettingsPanel
                api_key=api_key
                set_api_key=set_api_key
                saved_key=saved_key
                on_save=on_save_key
            />

            <UploadArea on_files_selected=on_files_selected />

            <Show when=move || progress.with(|p| p.is_some())>
                <ProgressBar progress=progress />
            </Show>

            <Show when=move || images.with(|v| !v.is_empty())>
                <Controls
                    images=images
                    is_running=is_running
                    on_analyze_all=on_analyze_all
                    on_rename_all=on_rename_all
                    on_download_zip=on_download_zip
                    on_clear=on_clear
                />
                <ImageGrid
                    images=images
                    is_running=is_running
                    on_analyze=on_analyze
                    on_rename=on_rename
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ImageEntry {
        let task = ImageTask::with_mime(Arc::<[u8]>::from(vec![1u8, 2, 3]), name, "image/png");
        ImageEntry::new(0, task, String::new())
    }

    #[test]
    fn test_download_name_keeps_original_extension() {
        let mut e = entry("IMG_0001.PNG");
        assert_eq!(e.download_name(), None);
        assert_eq!(e.suggestion_label(), "Not analyzed");

        e.task.mark_analyzed("red_sunset").unwrap();
        assert!(e.has_suggestion());
        assert_eq!(e.download_name().as_deref(), Some("red_sunset.PNG"));
        assert_eq!(e.suggestion_label(), "red_sunset");
    }

    #[test]
    fn test_download_name_prefers_final_name() {
        let mut e = entry("a.jpg");
        e.task.mark_analyzed("first").unwrap();
        e.task.mark_renamed("first.jpg").unwrap();
        assert_eq!(e.download_name().as_deref(), Some("first.jpg"));
        assert!(e.has_suggestion());
    }

    #[test]
    fn test_suggestion_label_states() {
        let mut e = entry("a.jpg");
        e.busy = true;
        assert_eq!(e.suggestion_label(), "Analyzing...");
        e.busy = false;
        e.last_error = Some("API error 400".into());
        assert_eq!(e.suggestion_label(), "Error analyzing image");
    }
}
