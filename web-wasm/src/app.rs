//! メインアプリケーションコンポーネント

use crate::api::{firestore, geocode, geolocation};
use crate::components::{
    error_banner::ErrorBanner,
    filter_dropdown::FilterDropdown,
    location_chip::LocationChip,
    location_modal::LocationModal,
    nav_bar::NavBar,
    opportunity_modal::OpportunityModal,
    opportunity_table::OpportunityTable,
    search_bar::SearchBar,
    toggle::Toggle,
};
use crate::export::download::download_csv;
use crate::storage::location_store;
use leptos::prelude::*;
use leptos::task::spawn_local;
use opportunity_common::csv_export::NOTHING_TO_EXPORT_MESSAGE;
use opportunity_common::location::{Ticket, MY_LOCATION_LABEL};
use opportunity_common::tags::{AGE_GROUP_OPTIONS, INDUSTRY_OPTIONS, OPPORTUNITY_TYPE_OPTIONS};
use opportunity_common::{
    reduce, Action, ListingStore, LoadStatus, Opportunity, RequestGuard, UserLocation, ViewState,
};

/// 画面状態をリデューサーで更新する
pub fn dispatch(state: RwSignal<ViewState>, action: Action) {
    state.update(|s| *s = reduce(std::mem::take(s), action));
}

fn begin(guard: RwSignal<RequestGuard>) -> Option<Ticket> {
    guard.try_update(|g| g.begin())
}

/// 最新のリクエストの結果だけを受け付ける
fn finish(guard: RwSignal<RequestGuard>, ticket: Ticket) -> bool {
    guard.try_update(|g| g.finish(ticket)).unwrap_or(false)
}

/// 現在地の取得方法
#[derive(Clone)]
enum LocationRequest {
    Address(String),
    Device,
}

async fn resolve(request: LocationRequest) -> Result<UserLocation, String> {
    match request {
        LocationRequest::Address(query) => {
            let coords = geocode::geocode(&query).await.map_err(|e| e.user_message())?;
            Ok(UserLocation { coords, label: query.trim().to_string() })
        }
        LocationRequest::Device => {
            let coords = geolocation::current_position()
                .await
                .map_err(|e| e.user_message())?;
            Ok(UserLocation { coords, label: MY_LOCATION_LABEL.to_string() })
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let listing = RwSignal::new(ListingStore::default());
    let state = RwSignal::new(ViewState::default());
    let load_guard = RwSignal::new(RequestGuard::default());
    let location_guard = RwSignal::new(RequestGuard::default());

    let (selected_id, set_selected_id) = signal(None::<String>);
    let (location_open, set_location_open) = signal(false);
    let (location_error, set_location_error) = signal(String::new());

    // 保存済みの現在地を復元（ソートは変えない）
    match location_store().load() {
        Ok(Some(location)) => dispatch(state, Action::LocationRestored(location)),
        Ok(None) => {}
        Err(e) => gloo::console::warn!("failed to read saved location", e),
    }

    // 一覧の読み込み（失敗時はバナーから再試行）
    let load = move |_: ()| {
        let Some(ticket) = begin(load_guard) else {
            return;
        };
        listing.set(ListingStore::default());

        spawn_local(async move {
            let result = firestore::fetch_all().await;
            if !finish(load_guard, ticket) {
                return;
            }
            if let Err(message) = &result {
                gloo::console::error!(format!("failed to load opportunities: {}", message));
            }
            listing.set(ListingStore::from_result(result));
        });
    };
    load(());

    let visible = Memo::new(move |_| {
        listing.with(|l| {
            state.with(|s| s.visible(l.records()).into_iter().cloned().collect::<Vec<Opportunity>>())
        })
    });
    let loading = Signal::derive(move || listing.with(|l| *l.status() == LoadStatus::Loading));
    let status = Signal::derive(move || listing.with(|l| l.status().clone()));

    // お気に入りのCSV出力
    let on_export = move |_: ()| {
        let result = listing.with(|l| state.with(|s| s.export_csv(l.records())));
        match result {
            Ok(Some(file)) => {
                if let Err(e) = download_csv(&file) {
                    gloo::console::error!("failed to download csv", e);
                }
            }
            Ok(None) => gloo::dialogs::alert(NOTHING_TO_EXPORT_MESSAGE),
            Err(e) => gloo::console::error!(format!("failed to build csv: {}", e)),
        }
    };

    // 現在地の解決（1チャネル1リクエスト）
    let request_location = move |request: LocationRequest| {
        let Some(ticket) = begin(location_guard) else {
            return;
        };
        set_location_error.set(String::new());

        spawn_local(async move {
            let result = resolve(request).await;
            if !finish(location_guard, ticket) {
                return;
            }
            match result {
                Ok(location) => {
                    if let Err(e) = location_store().save(&location) {
                        gloo::console::warn!("failed to save location", e);
                    }
                    dispatch(state, Action::LocationResolved(location));
                    set_location_open.set(false);
                }
                Err(message) => set_location_error.set(message),
            }
        });
    };

    let open_location = move |_: ()| {
        set_location_error.set(String::new());
        set_location_open.set(true);
    };
    let close_location = move |_: ()| {
        location_guard.update(|g| g.cancel());
        set_location_open.set(false);
    };
    let clear_location = move |_: ()| {
        if let Err(e) = location_store().clear() {
            gloo::console::warn!("failed to clear location", e);
        }
        dispatch(state, Action::LocationCleared);
    };

    // Escapeでモーダルを閉じる（アプリ終了まで解除しない）
    let _ = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            set_selected_id.set(None);
            if location_open.get_untracked() {
                close_location(());
            }
        }
    });

    let selected = move || {
        selected_id
            .get()
            .and_then(|id| listing.with(|l| l.get(&id).cloned()))
    };

    view! {
        <div class="app">
            <NavBar state=state on_export=on_export />

            <main class="container">
                <ErrorBanner status=status on_retry=load />

                <div class="controls">
                    <SearchBar state=state />
                    <FilterDropdown
                        label="Industry"
                        options=INDUSTRY_OPTIONS
                        selected=Signal::derive(move || state.with(|s| s.filters.selected_industries.clone()))
                        on_toggle=move |value| dispatch(state, Action::ToggleIndustry(value))
                    />
                    <FilterDropdown
                        label="Age Group"
                        options=AGE_GROUP_OPTIONS
                        selected=Signal::derive(move || state.with(|s| s.filters.selected_age_groups.clone()))
                        on_toggle=move |value| dispatch(state, Action::ToggleAgeGroup(value))
                    />
                    <FilterDropdown
                        label="Type"
                        options=OPPORTUNITY_TYPE_OPTIONS
                        selected=Signal::derive(move || state.with(|s| s.filters.selected_opportunity_types.clone()))
                        on_toggle=move |value| dispatch(state, Action::ToggleOpportunityType(value))
                    />
                    <Toggle
                        label="Remote only"
                        checked=Signal::derive(move || state.with(|s| s.filters.show_remote_only))
                        on_change=move |on| dispatch(state, Action::ShowRemoteOnly(on))
                    />
                    <button class="btn btn-link" on:click=move |_| dispatch(state, Action::ClearFilters)>
                        "Clear filters"
                    </button>
                    <LocationChip state=state on_set=open_location on_clear=clear_location />
                </div>

                <OpportunityTable
                    rows=visible
                    state=state
                    loading=loading
                    on_more_info=move |id| set_selected_id.set(Some(id))
                />
            </main>

            {move || selected().map(|opportunity| view! {
                <OpportunityModal
                    opportunity=opportunity
                    on_close=move |_| set_selected_id.set(None)
                />
            })}

            <Show when=move || location_open.get()>
                <LocationModal
                    initial_label=location_store().saved_label().unwrap_or_default()
                    busy=Signal::derive(move || location_guard.with(|g| g.is_in_flight()))
                    error=location_error.into()
                    on_submit=move |query| request_location(LocationRequest::Address(query))
                    on_use_device=move |_| request_location(LocationRequest::Device)
                    on_cancel=close_location
                />
            </Show>
        </div>
    }
}
