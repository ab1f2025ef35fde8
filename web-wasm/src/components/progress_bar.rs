//! プログレスバーコンポーネント

use crate::app::Progress;
use leptos::prelude::*;

#[component]
pub fn ProgressBar(progress: ReadSignal<Option<Progress>>) -> impl IntoView {
    let fraction = move || progress.with(|p| p.as_ref().map(|p| p.fraction).unwrap_or(0.0));

    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", fraction() * 100.0)
                />
            </div>
            <p class="progress-text">
                {move || progress.with(|p| p.as_ref().map(|p| p.label.clone()).unwrap_or_default())}
            </p>
        </div>
    }
}
