//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"AI Image Labeler"</h1>
            <p class="text-muted">"Gemini が画像の内容から説明的なファイル名を提案します"</p>
        </header>
    }
}
