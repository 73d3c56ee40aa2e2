//! 複数選択のドロップダウン

use leptos::prelude::*;
use std::collections::BTreeSet;

/// ボタンの表示（選択数があれば併記）
pub fn summary_label(label: &str, selected: usize) -> String {
    if selected == 0 {
        label.to_string()
    } else {
        format!("{} ({})", label, selected)
    }
}

#[component]
pub fn FilterDropdown<F>(
    label: &'static str,
    options: &'static [&'static str],
    selected: Signal<BTreeSet<String>>,
    on_toggle: F,
) -> impl IntoView
where
    F: Fn(String) + Copy + Send + Sync + 'static,
{
    let (open, set_open) = signal(false);

    view! {
        <div class="dropdown">
            <button
                class="dropdown-toggle"
                class:has-selection=move || selected.with(|s| !s.is_empty())
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                {move || summary_label(label, selected.with(|s| s.len()))}
                " ▾"
            </button>

            <Show when=move || open.get()>
                // 外側のクリックで閉じる
                <div class="dropdown-backdrop" on:click=move |_| set_open.set(false)></div>
                <div class="dropdown-menu">
                    {options
                        .iter()
                        .map(|option| {
                            let option = *option;
                            view! {
                                <label class="dropdown-item">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selected.with(|s| s.contains(option))
                                        on:change=move |_| on_toggle(option.to_string())
                                    />
                                    {option}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
