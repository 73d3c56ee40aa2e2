//! 募集一覧テーブル

use crate::app::dispatch;
use leptos::prelude::*;
use opportunity_common::tags::tag_class;
use opportunity_common::{Action, Opportunity, SortDirection, SortKey, SortState, ViewState};

/// 列見出しの矢印
pub fn sort_indicator(sort: SortState, key: SortKey) -> &'static str {
    if sort.key != key {
        return "";
    }
    match sort.direction {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

pub fn format_distance(miles: Option<f64>) -> String {
    match miles {
        Some(miles) => format!("{:.1} mi", miles),
        None => "—".to_string(),
    }
}

/// 表示用の日時（解析できなかった値はそのまま）
fn display_date(opp: &Opportunity) -> String {
    if opp.date_time.is_empty() {
        opp.date.clone()
    } else {
        opp.date_time.clone()
    }
}

#[component]
fn SortHeader(state: RwSignal<ViewState>, key: SortKey, title: &'static str) -> impl IntoView {
    view! {
        <th class="sortable" on:click=move |_| dispatch(state, Action::SortBy(key))>
            {title}
            {move || sort_indicator(state.with(|s| s.sort), key)}
        </th>
    }
}

#[component]
fn OpportunityRow<FM>(opp: Opportunity, state: RwSignal<ViewState>, on_more_info: FM) -> impl IntoView
where
    FM: Fn(String) + Copy + Send + Sync + 'static,
{
    let id = opp.id.clone();
    let is_favorite = {
        let id = id.clone();
        move || state.with(|s| s.favorites.contains(&id))
    };
    let located = move || state.with(|s| s.user_location.is_some());
    let distance = {
        let opp = opp.clone();
        move || format_distance(state.with(|s| s.distance_to(&opp)))
    };

    let tags = opp
        .tags
        .iter()
        .map(|tag| {
            let class = format!("tag {}", tag_class(tag));
            view! { <span class=class>{tag.clone()}</span> }
        })
        .collect_view();

    view! {
        <tr>
            <td>
                <button
                    class="heart"
                    class:favorited=is_favorite.clone()
                    title="Toggle favorite"
                    on:click={
                        let id = id.clone();
                        move |_| dispatch(state, Action::ToggleFavorite(id.clone()))
                    }
                >
                    {{
                        let is_favorite = is_favorite.clone();
                        move || if is_favorite() { "♥" } else { "♡" }
                    }}
                </button>
            </td>
            <td class="name">
                {opp.name.clone()}
                {opp.is_remote().then(|| view! { <span class="badge badge-remote">"Remote"</span> })}
                {opp.recurrence.is_recurring().then(|| view! { <span class="badge badge-recurring">"Recurring"</span> })}
            </td>
            <td>{opp.organization.clone()}</td>
            <td>{opp.location.clone()}</td>
            <td>{display_date(&opp)}</td>
            <Show when=located>
                <td class="distance">{distance.clone()}</td>
            </Show>
            <td class="tags">{tags}</td>
            <td>
                <button class="btn btn-link" on:click=move |_| on_more_info(id.clone())>
                    "More Info"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn OpportunityTable<FM>(
    rows: Memo<Vec<Opportunity>>,
    state: RwSignal<ViewState>,
    loading: Signal<bool>,
    on_more_info: FM,
) -> impl IntoView
where
    FM: Fn(String) + Copy + Send + Sync + 'static,
{
    let located = move || state.with(|s| s.user_location.is_some());

    view! {
        <table class="opportunity-table">
            <thead>
                <tr>
                    <th></th>
                    <SortHeader state=state key=SortKey::Name title="Opportunity Name" />
                    <SortHeader state=state key=SortKey::Organization title="Organization" />
                    <th>"Location"</th>
                    <SortHeader state=state key=SortKey::Date title="Date" />
                    <Show when=located>
                        <SortHeader state=state key=SortKey::Distance title="Distance" />
                    </Show>
                    <th>"Tags"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get()
                    key=|opp| opp.id.clone()
                    children=move |opp| view! { <OpportunityRow opp=opp state=state on_more_info=on_more_info /> }
                />
            </tbody>
        </table>

        <Show when=move || loading.get()>
            <p class="text-muted">"Loading opportunities..."</p>
        </Show>
        <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
            <p class="text-muted">"No opportunities match your filters."</p>
        </Show>
    }
}
