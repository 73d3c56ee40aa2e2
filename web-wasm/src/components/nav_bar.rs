//! ナビゲーションバー

use crate::app::dispatch;
use leptos::prelude::*;
use opportunity_common::{Action, ViewState};

#[component]
pub fn NavBar<FE>(state: RwSignal<ViewState>, on_export: FE) -> impl IntoView
where
    FE: Fn(()) + 'static + Clone,
{
    let showing_favorites = move || state.with(|s| s.filters.show_only_favorites);
    let favorite_count = move || state.with(|s| s.favorites.count());

    view! {
        <nav class="nav-bar">
            <span class="brand">"Youth Opportunity Finder"</span>

            <div class="nav-links">
                <button
                    class="nav-link"
                    class:active=move || !showing_favorites()
                    on:click=move |_| dispatch(state, Action::ShowOnlyFavorites(false))
                >
                    "Opportunities"
                </button>
                <button
                    class="nav-link"
                    class:active=showing_favorites
                    on:click=move |_| dispatch(state, Action::ShowOnlyFavorites(true))
                >
                    "Favorites"
                    <span class="badge">{favorite_count}</span>
                </button>
            </div>

            <button
                class="btn btn-primary"
                on:click={
                    let on_export = on_export.clone();
                    move |_| on_export(())
                }
            >
                "Export Favorites"
            </button>
        </nav>
    }
}
