//! 一括操作ボタン

use crate::app::ImageEntry;
use leptos::prelude::*;

#[component]
pub fn Controls<FA, FR, FZ, FC>(
    images: ReadSignal<Vec<ImageEntry>>,
    is_running: ReadSignal<bool>,
    on_analyze_all: FA,
    on_rename_all: FR,
    on_download_zip: FZ,
    on_clear: FC,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
    FZ: Fn(()) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let analyzed_count = move || images.with(|v| v.iter().filter(|e| e.has_suggestion()).count());
    let total_count = move || images.with(|v| v.len());

    view! {
        <div class="controls">
            <p class="text-muted">
                {move || format!("{} image(s), {} analyzed", total_count(), analyzed_count())}
            </p>
            <div class="controls-buttons">
                <button
                    class="btn btn-primary"
                    disabled=move || is_running.get()
                    on:click={
                        let on_analyze_all = on_analyze_all.clone();
                        move |_| on_analyze_all(())
                    }
                >
                    "Analyze All"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || is_running.get()
                    on:click={
                        let on_rename_all = on_rename_all.clone();
                        move |_| on_rename_all(())
                    }
                >
                    "Rename All"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || is_running.get()
                    on:click={
                        let on_download_zip = on_download_zip.clone();
                        move |_| on_download_zip(())
                    }
                >
                    "Download ZIP"
                </button>
                <button
                    class="btn btn-tertiary"
                    disabled=move || is_running.get()
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "Clear"
                </button>
            </div>
        </div>
    }
}
