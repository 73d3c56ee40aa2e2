//! 現在地の設定モーダル

use leptos::prelude::*;

/// 空白だけの入力や問い合わせ中は送信しない
pub fn can_submit(query: &str, busy: bool) -> bool {
    !busy && !query.trim().is_empty()
}

#[component]
pub fn LocationModal<FS, FD, FC>(
    initial_label: String,
    busy: Signal<bool>,
    error: Signal<String>,
    on_submit: FS,
    on_use_device: FD,
    on_cancel: FC,
) -> impl IntoView
where
    FS: Fn(String) + Copy + 'static,
    FD: Fn(()) + Copy + 'static,
    FC: Fn(()) + Copy + 'static,
{
    let (query, set_query) = signal(initial_label);
    let submit = move || {
        let query = query.get_untracked();
        if can_submit(&query, busy.get_untracked()) {
            on_submit(query);
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_cancel(())>
            <div class="modal modal-small" on:click=|ev| ev.stop_propagation()>
                <h2>"Set your location"</h2>

                <input
                    type="text"
                    placeholder="ZIP or City, State (e.g., 48104 or Austin, TX)"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            submit();
                        }
                    }
                />

                <Show when=move || !error.get().is_empty()>
                    <p class="error-text">{move || error.get()}</p>
                </Show>

                <div class="modal-actions">
                    <button
                        class="btn btn-tertiary"
                        disabled=move || busy.get()
                        on:click=move |_| on_use_device(())
                    >
                        "Use My Location"
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| on_cancel(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || query.with(|q| !can_submit(q, busy.get()))
                        on:click=move |_| submit()
                    >
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_blank_query_cannot_submit() {
        assert!(!can_submit("", false));
        assert!(!can_submit("   ", false));
        assert!(!can_submit("48104", true));
        assert!(can_submit(" Austin, TX ", false));
    }
}
