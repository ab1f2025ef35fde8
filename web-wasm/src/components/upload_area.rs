//! アップロードエリアコンポーネント
//!
//! ファイル選択とフォルダ選択（webkitdirectory）の2つの入力を持つ。

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

#[component]
pub fn UploadArea<F>(on_files_selected: F) -> impl IntoView
where
    F: Fn(Vec<web_sys::File>) + 'static + Clone + Send + Sync,
{
    let file_input = NodeRef::<Input>::new();
    let folder_input = NodeRef::<Input>::new();

    // フォルダ選択を有効にする
    Effect::new(move |_| {
        if let Some(input) = folder_input.get() {
            input.set_webkitdirectory(true);
        }
    });

    let handle_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let files = input
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
        on_files_selected(files);
    };

    view! {
        <div class="upload-area">
            <div class="upload-icon">"📷"</div>
            <p>"画像ファイルまたはフォルダを選択してください"</p>
            <p class="text-muted">"対応形式: JPEG, PNG, GIF, WebP, BMP"</p>

            <div class="upload-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| {
                        if let Some(input) = file_input.get() {
                            input.click();
                        }
                    }
                >
                    "Select Images"
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| {
                        if let Some(input) = folder_input.get() {
                            input.click();
                        }
                    }
                >
                    "Select Folder"
                </button>
            </div>

            <input
                node_ref=file_input
                type="file"
                accept="image/*"
                multiple=true
                style="display: none"
                on:change={
                    let handle_change = handle_change.clone();
                    move |ev| handle_change(ev)
                }
            />
            <input
                node_ref=folder_input
                type="file"
                multiple=true
                style="display: none"
                on:change=move |ev| handle_change(ev)
            />
        </div>
    }
}
