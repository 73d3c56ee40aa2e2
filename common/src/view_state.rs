//! 画面状態とリデューサー
//!
//! 絞り込み・並べ替え・お気に入り・現在地を1つの値にまとめ、
//! `reduce(state, action)` だけで遷移させる。表示リストは
//! `visible` で毎回ゼロから計算する（絞り込み → 並べ替え）。

use crate::csv_export::{export_favorites, CsvFile};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::filter::{filter_opportunities, Filters};
use crate::geo::distance_from;
use crate::sort::{sort_opportunities, SortDirection, SortKey, SortState};
use crate::types::{Opportunity, UserLocation};
use std::collections::BTreeSet;

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub filters: Filters,
    pub sort: SortState,
    pub favorites: Favorites,
    pub user_location: Option<UserLocation>,
}

/// 状態遷移
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSearch(String),
    ToggleIndustry(String),
    ToggleAgeGroup(String),
    ToggleOpportunityType(String),
    ClearFilters,
    ShowOnlyFavorites(bool),
    ShowRemoteOnly(bool),
    /// 列見出しのクリック
    SortBy(SortKey),
    /// キーと方向を直接指定（CLI用）
    SetSort(SortState),
    ToggleFavorite(String),
    LocationResolved(UserLocation),
    /// 起動時に保存済みの現在地を復元（ソートは変えない）
    LocationRestored(UserLocation),
    LocationCleared,
}

fn toggle_member(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// 現在の状態とアクションから次の状態を返す
pub fn reduce(mut state: ViewState, action: Action) -> ViewState {
    match action {
        Action::SetSearch(search) => state.filters.search = search,
        Action::ToggleIndustry(value) => toggle_member(&mut state.filters.selected_industries, value),
        Action::ToggleAgeGroup(value) => toggle_member(&mut state.filters.selected_age_groups, value),
        Action::ToggleOpportunityType(value) => {
            toggle_member(&mut state.filters.selected_opportunity_types, value)
        }
        Action::ClearFilters => {
            state.filters = Filters {
                show_only_favorites: state.filters.show_only_favorites,
                ..Filters::default()
            }
        }
        Action::ShowOnlyFavorites(on) => state.filters.show_only_favorites = on,
        Action::ShowRemoteOnly(on) => state.filters.show_remote_only = on,
        Action::SortBy(key) => state.sort = state.sort.clicked(key),
        Action::SetSort(sort) => state.sort = sort,
        Action::ToggleFavorite(id) => {
            state.favorites.toggle(&id);
        }
        Action::LocationResolved(location) => {
            state.user_location = Some(location);
            state.sort = SortState { key: SortKey::Distance, direction: SortDirection::Asc };
        }
        Action::LocationRestored(location) => state.user_location = Some(location),
        Action::LocationCleared => {
            state.user_location = None;
            if state.sort.key == SortKey::Distance {
                state.sort = SortState::default();
            }
        }
    }
    state
}

impl ViewState {
    pub fn apply(self, action: Action) -> Self {
        reduce(self, action)
    }

    /// 絞り込みのみ（お気に入り限定表示を含む）
    pub fn filtered<'a>(&self, records: &'a [Opportunity]) -> Vec<&'a Opportunity> {
        filter_opportunities(records, &self.filters, &self.favorites)
    }

    /// 表示するリスト（絞り込み → 並べ替え）
    pub fn visible<'a>(&self, records: &'a [Opportunity]) -> Vec<&'a Opportunity> {
        sort_opportunities(
            self.filtered(records),
            self.sort,
            self.user_location.as_ref().map(|loc| loc.coords),
        )
    }

    /// 現在地からの距離（マイル）。座標が無ければ None
    pub fn distance_to(&self, opp: &Opportunity) -> Option<f64> {
        let d = distance_from(self.user_location.as_ref().map(|loc| loc.coords), opp.coordinates);
        d.is_finite().then_some(d)
    }

    /// 絞り込み済みかつお気に入りのレコードをCSVにする
    ///
    /// お気に入り限定表示かどうかに関係なく、同じ集合を出力する。
    pub fn export_csv(&self, records: &[Opportunity]) -> Result<Option<CsvFile>> {
        let criteria = ViewState {
            filters: Filters { show_only_favorites: false, ..self.filters.clone() },
            ..self.clone()
        };
        export_favorites(&criteria.visible(records), &self.favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;

    fn opp(id: &str, name: &str) -> Opportunity {
        Opportunity { id: id.into(), name: name.into(), ..Default::default() }
    }

    fn location() -> UserLocation {
        UserLocation { coords: Coordinates { lat: 42.0, lng: -83.0 }, label: "Home".into() }
    }

    fn ids(found: &[&Opportunity]) -> Vec<String> {
        found.iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_toggle_filter_option_twice_restores() {
        let state = ViewState::default();
        let toggled = reduce(state.clone(), Action::ToggleIndustry("Tech".into()));
        assert!(toggled.filters.selected_industries.contains("Tech"));

        let restored = reduce(toggled, Action::ToggleIndustry("Tech".into()));
        assert_eq!(restored, state);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let state = ViewState::default()
            .apply(Action::ToggleFavorite("a".into()))
            .apply(Action::ToggleFavorite("a".into()));
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn test_location_resolved_activates_distance_sort() {
        let state = ViewState::default()
            .apply(Action::SortBy(SortKey::Name))
            .apply(Action::SortBy(SortKey::Name))
            .apply(Action::LocationResolved(location()));
        assert_eq!(state.sort, SortState { key: SortKey::Distance, direction: SortDirection::Asc });
        assert_eq!(state.user_location, Some(location()));
    }

    #[test]
    fn test_location_restored_keeps_sort() {
        let state = ViewState::default().apply(Action::LocationRestored(location()));
        assert_eq!(state.sort.key, SortKey::None);
        assert!(state.user_location.is_some());
    }

    #[test]
    fn test_location_cleared_resets_distance_sort() {
        let state = ViewState::default()
            .apply(Action::LocationResolved(location()))
            .apply(Action::LocationCleared);
        assert_eq!(state.sort, SortState::default());
        assert!(state.user_location.is_none());

        // 距離以外のソートは維持
        let state = ViewState::default()
            .apply(Action::LocationResolved(location()))
            .apply(Action::SortBy(SortKey::Date))
            .apply(Action::LocationCleared);
        assert_eq!(state.sort.key, SortKey::Date);
    }

    #[test]
    fn test_clear_filters_keeps_favorites_view() {
        let state = ViewState::default()
            .apply(Action::SetSearch("camp".into()))
            .apply(Action::ToggleAgeGroup("College".into()))
            .apply(Action::ShowRemoteOnly(true))
            .apply(Action::ShowOnlyFavorites(true))
            .apply(Action::ClearFilters);
        assert!(state.filters.show_only_favorites);
        assert!(state.filters.search.is_empty());
        assert!(state.filters.selected_age_groups.is_empty());
        assert!(!state.filters.show_remote_only);
    }

    #[test]
    fn test_visible_filters_then_sorts() {
        let records = vec![opp("1", "Zeta Camp"), opp("2", "Alpha Camp"), opp("3", "Other")];
        let state = ViewState::default()
            .apply(Action::SetSearch("camp".into()))
            .apply(Action::SortBy(SortKey::Name));
        assert_eq!(ids(&state.visible(&records)), vec!["2", "1"]);

        // 絞り込みの結果集合は並べ替えに依存しない
        let mut filtered = ids(&state.filtered(&records));
        let mut visible = ids(&state.visible(&records));
        filtered.sort();
        visible.sort();
        assert_eq!(filtered, visible);
    }

    #[test]
    fn test_distance_to() {
        let near = Opportunity {
            coordinates: Some(Coordinates { lat: 42.1, lng: -83.1 }),
            ..opp("n", "Near")
        };
        let state = ViewState::default();
        assert_eq!(state.distance_to(&near), None);

        let state = state.apply(Action::LocationResolved(location()));
        let d = state.distance_to(&near).expect("距離が無い");
        assert!((d - 8.6).abs() < 0.1);
        assert_eq!(state.distance_to(&opp("x", "No coords")), None);
    }

    #[test]
    fn test_export_csv_ignores_favorites_only_flag() {
        let records = vec![opp("1", "Zeta"), opp("2", "Alpha"), opp("3", "Beta")];
        let state = ViewState::default()
            .apply(Action::ToggleFavorite("1".into()))
            .apply(Action::ToggleFavorite("2".into()))
            .apply(Action::SortBy(SortKey::Name));

        let all_view = state.export_csv(&records).unwrap().unwrap();
        let fav_view = state
            .clone()
            .apply(Action::ShowOnlyFavorites(true))
            .export_csv(&records)
            .unwrap()
            .unwrap();
        assert_eq!(all_view, fav_view);
        assert_eq!(all_view.row_count, 2);
        // 現在の並び順で出力
        assert!(all_view.content.lines().nth(1).unwrap().starts_with("\"Alpha\""));
    }

    #[test]
    fn test_export_csv_empty_when_favorites_filtered_out() {
        let records = vec![opp("1", "Zeta"), opp("2", "Alpha")];
        let state = ViewState::default()
            .apply(Action::ToggleFavorite("1".into()))
            .apply(Action::SetSearch("alpha".into()));
        assert!(state.export_csv(&records).unwrap().is_none());
    }
}
