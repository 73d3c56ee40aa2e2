//! 現在地の表示と設定・解除

use leptos::prelude::*;
use opportunity_common::ViewState;

#[component]
pub fn LocationChip<FS, FC>(state: RwSignal<ViewState>, on_set: FS, on_clear: FC) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
    FC: Fn(()) + Copy + Send + Sync + 'static,
{
    let label = move || state.with(|s| s.user_location.as_ref().map(|loc| loc.label.clone()));

    view! {
        <div class="location-chip">
            <span class="location-label">
                {move || match label() {
                    Some(label) if !label.is_empty() => format!("📍 {}", label),
                    Some(_) => "📍 Location set".to_string(),
                    None => "No location set".to_string(),
                }}
            </span>
            <button
                class="btn btn-secondary btn-small"
                on:click={
                    let on_set = on_set.clone();
                    move |_| on_set(())
                }
            >
                "Set"
            </button>
            <Show when=move || label().is_some()>
                <button class="btn btn-tertiary btn-small" on:click=move |_| on_clear(())>
                    "Clear"
                </button>
            </Show>
        </div>
    }
}
