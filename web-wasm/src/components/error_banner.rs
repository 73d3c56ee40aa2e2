//! 読み込み失敗時のバナー

use leptos::prelude::*;
use opportunity_common::LoadStatus;

#[component]
pub fn ErrorBanner<FR>(status: Signal<LoadStatus>, on_retry: FR) -> impl IntoView
where
    FR: Fn(()) + Copy + Send + Sync + 'static,
{
    let message = move || match status.get() {
        LoadStatus::Failed(message) => Some(message),
        _ => None,
    };

    view! {
        <Show when=move || message().is_some()>
            <div class="error-banner" role="alert">
                <span>"Couldn't load opportunities: " {message}</span>
                <button class="btn btn-secondary btn-small" on:click=move |_| on_retry(())>
                    "Retry"
                </button>
            </div>
        </Show>
    }
}
