//! 検索ボックス

use crate::app::dispatch;
use leptos::prelude::*;
use opportunity_common::{Action, ViewState};

#[component]
pub fn SearchBar(state: RwSignal<ViewState>) -> impl IntoView {
    view! {
        <div class="search-bar">
            <input
                type="search"
                placeholder="Search by name, organization, or location..."
                prop:value=move || state.with(|s| s.filters.search.clone())
                on:input=move |ev| dispatch(state, Action::SetSearch(event_target_value(&ev)))
            />
        </div>
    }
}
