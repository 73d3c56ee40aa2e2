//! オン/オフのスイッチ

use leptos::prelude::*;

#[component]
pub fn Toggle<F>(label: &'static str, checked: Signal<bool>, on_change: F) -> impl IntoView
where
    F: Fn(bool) + 'static,
{
    view! {
        <label class="toggle">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change(event_target_checked(&ev))
            />
            <span class="toggle-slider"></span>
            <span class="toggle-label">{label}</span>
        </label>
    }
}
