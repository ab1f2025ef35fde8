//! 画像カード一覧

use crate::app::ImageEntry;
use image_labeler_common::TaskStatus;
use leptos::prelude::*;

#[component]
pub fn ImageGrid<FA, FR>(
    images: ReadSignal<Vec<ImageEntry>>,
    is_running: ReadSignal<bool>,
    on_analyze: FA,
    on_rename: FR,
) -> impl IntoView
where
    FA: Fn(u32) + 'static + Clone + Send + Sync,
    FR: Fn(u32) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="image-grid">
            <For
                each=move || images.get()
                key=|entry| entry.id
                children=move |entry| {
                    let on_analyze = on_analyze.clone();
                    let on_rename = on_rename.clone();
                    view! {
                        <ImageCard
                            entry=entry
                            images=images
                            is_running=is_running
                            on_analyze=on_analyze
                            on_rename=on_rename
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ImageCard<FA, FR>(
    entry: ImageEntry,
    images: ReadSignal<Vec<ImageEntry>>,
    is_running: ReadSignal<bool>,
    on_analyze: FA,
    on_rename: FR,
) -> impl IntoView
where
    FA: Fn(u32) + 'static + Clone + Send + Sync,
    FR: Fn(u32) + 'static + Clone + Send + Sync,
{
    let id = entry.id;

    // カードは id で固定し、表示内容は一覧シグナルから都度引く
    let current = move || images.with(|v| v.iter().find(|e| e.id == id).cloned());
    let status = move || current().map(|e| e.task.status()).unwrap_or(TaskStatus::Pending);
    let busy = move || current().map(|e| e.busy).unwrap_or(false);
    let suggestion = move || current().map(|e| e.suggestion_label()).unwrap_or_default();
    let has_error = move || current().map(|e| e.last_error.is_some()).unwrap_or(false);

    let analyze_label = move || match status() {
        TaskStatus::Pending => "Analyze",
        _ => "Re-analyze",
    };
    let analyze_disabled = move || busy() || is_running.get() || status() == TaskStatus::Renamed;
    let rename_disabled =
        move || busy() || is_running.get() || !matches!(status(), TaskStatus::Analyzed | TaskStatus::Renamed);

    view! {
        <div class=move || format!("image-card {}", status().as_str())>
            <img src=entry.preview_url.clone() alt=entry.task.original_name.clone() />
            <div class="image-info">
                <div class="original-name">"Original: " {entry.task.original_name.clone()}</div>
                <div class="suggested-name">
                    "Suggested: "
                    <span class=move || if has_error() { "suggested-text error" } else { "suggested-text" }>
                        {suggestion}
                    </span>
                </div>
                <div class="actions">
                    <button
                        disabled=analyze_disabled
                        on:click={
                            let on_analyze = on_analyze.clone();
                            move |_| on_analyze(id)
                        }
                    >
                        {analyze_label}
                    </button>
                    <button
                        disabled=rename_disabled
                        on:click={
                            let on_rename = on_rename.clone();
                            move |_| on_rename(id)
                        }
                    >
                        "Rename"
                    </button>
                </div>
            </div>
        </div>
    }
}
