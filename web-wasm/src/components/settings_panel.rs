//! 設定パネルコンポーネント

use leptos::prelude::*;

#[component]
pub fn SettingsPanel<FS>(
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
    saved_key: ReadSignal<Option<String>>,
    on_save: FS,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    // 入力欄が保存済みの値と一致しているか
    let is_saved = move || {
        let current = api_key.get();
        saved_key.with(|saved| saved.as_deref() == Some(current.trim()))
    };

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="Enter your Gemini API key"
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        set_api_key.set(event_target_value(&ev));
                    }
                />
                <button
                    class=move || if is_saved() { "btn btn-secondary" } else { "btn btn-primary" }
                    on:click={
                        let on_save = on_save.clone();
                        move |_| on_save(())
                    }
                >
                    {move || if is_saved() { "API Key Saved ✓" } else { "Save Key" }}
                </button>
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "APIキーを取得 →"
                </a>
            </div>
        </div>
    }
}
