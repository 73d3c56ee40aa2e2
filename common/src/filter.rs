//! 絞り込み
//!
//! 独立した条件の論理積。複数選択の条件は選択肢同士の論理和で、
//! 何も選択していなければ常に真。入力の順序は保持する。

use crate::favorites::Favorites;
use crate::types::Opportunity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub selected_industries: BTreeSet<String>,
    pub selected_age_groups: BTreeSet<String>,
    pub selected_opportunity_types: BTreeSet<String>,
    pub search: String,
    pub show_only_favorites: bool,
    pub show_remote_only: bool,
}

impl Filters {
    /// 複数選択・検索・リモートの条件が何も無いか
    pub fn is_unrestricted(&self) -> bool {
        self.selected_industries.is_empty()
            && self.selected_age_groups.is_empty()
            && self.selected_opportunity_types.is_empty()
            && self.search.trim().is_empty()
            && !self.show_remote_only
    }

    /// お気に入り以外の条件をすべて満たすか
    pub fn matches(&self, opp: &Opportunity) -> bool {
        matches_any(&self.selected_industries, &opp.tags)
            && matches_any(&self.selected_age_groups, &opp.age_groups)
            && (self.selected_opportunity_types.is_empty()
                || self.selected_opportunity_types.contains(&opp.opportunity_type))
            && (!self.show_remote_only || opp.is_remote())
            && matches_search(&self.search, opp)
    }
}

fn matches_any(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

/// 名称・団体名・所在地の部分一致（大文字小文字を区別しない）
///
/// タグや説明文は検索対象外。
pub fn matches_search(query: &str, opp: &Opportunity) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    [&opp.name, &opp.organization, &opp.location]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// 条件で絞り込み、必要ならお気に入りと積を取る
pub fn filter_opportunities<'a>(
    records: &'a [Opportunity],
    filters: &Filters,
    favorites: &Favorites,
) -> Vec<&'a Opportunity> {
    records
        .iter()
        .filter(|opp| filters.matches(opp))
        .filter(|opp| !filters.show_only_favorites || favorites.contains(&opp.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opp(id: &str) -> Opportunity {
        Opportunity { id: id.to_string(), ..Default::default() }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn ids(found: &[&Opportunity]) -> Vec<String> {
        found.iter().map(|o| o.id.clone()).collect()
    }

    fn sample() -> Vec<Opportunity> {
        vec![
            Opportunity {
                name: "Coding Camp".into(),
                organization: "TechCorp".into(),
                location: "Ann Arbor, MI".into(),
                tags: vec!["Tech".into(), "STEM".into()],
                age_groups: vec!["High School".into()],
                opportunity_type: "Workshop".into(),
                remote_type: "Remote".into(),
                ..opp("1")
            },
            Opportunity {
                name: "River Cleanup".into(),
                organization: "Green Earth".into(),
                location: "Detroit, MI".into(),
                tags: vec!["Environment".into(), "Community".into()],
                age_groups: vec!["All Ages".into(), "College".into()],
                opportunity_type: "Volunteering".into(),
                remote_type: "In-Person".into(),
                ..opp("2")
            },
            Opportunity {
                name: "Law Internship".into(),
                organization: "Smith & Co".into(),
                location: "Lansing, MI".into(),
                tags: vec!["Law/Legal".into()],
                age_groups: vec!["College".into()],
                opportunity_type: "Internship".into(),
                ..opp("3")
            },
        ]
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let records = sample();
        let found = filter_opportunities(&records, &Filters::default(), &Favorites::default());
        assert_eq!(ids(&found), vec!["1", "2", "3"]);
        assert!(Filters::default().is_unrestricted());
    }

    #[test]
    fn test_industry_or_within_and_across() {
        let records = sample();
        let filters = Filters {
            selected_industries: set(&["Tech", "Community"]),
            ..Default::default()
        };
        let found = filter_opportunities(&records, &filters, &Favorites::default());
        assert_eq!(ids(&found), vec!["1", "2"]);

        let filters = Filters {
            selected_industries: set(&["Tech", "Community"]),
            selected_age_groups: set(&["College"]),
            ..Default::default()
        };
        let found = filter_opportunities(&records, &filters, &Favorites::default());
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn test_type_filter() {
        let records = sample();
        let filters = Filters {
            selected_opportunity_types: set(&["Internship", "Event"]),
            ..Default::default()
        };
        let found = filter_opportunities(&records, &filters, &Favorites::default());
        assert_eq!(ids(&found), vec!["3"]);
    }

    #[test]
    fn test_remote_only() {
        let records = sample();
        let filters = Filters { show_remote_only: true, ..Default::default() };
        let found = filter_opportunities(&records, &filters, &Favorites::default());
        assert_eq!(ids(&found), vec!["1"]);
    }

    #[test]
    fn test_search_case_insensitive_scope() {
        let records = sample();

        let filters = Filters { search: "tech".into(), ..Default::default() };
        let found = filter_opportunities(&records, &filters, &Favorites::default());
        assert_eq!(ids(&found), vec!["1"]);

        // タグのみに含まれる語は一致しない
        let filters = Filters { search: "environment".into(), ..Default::default() };
        assert!(filter_opportunities(&records, &filters, &Favorites::default()).is_empty());

        let filters = Filters { search: "  DETROIT ".into(), ..Default::default() };
        let found = filter_opportunities(&records, &filters, &Favorites::default());
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn test_empty_tags_fail_industry_filter() {
        let records = vec![opp("bare")];
        let filters = Filters { selected_industries: set(&["Tech"]), ..Default::default() };
        assert!(filter_opportunities(&records, &filters, &Favorites::default()).is_empty());
    }

    #[test]
    fn test_show_only_favorites_intersects() {
        let records = sample();
        let mut favorites = Favorites::default();
        favorites.toggle("3");
        favorites.toggle("1");

        let filters = Filters {
            show_only_favorites: true,
            selected_age_groups: set(&["College"]),
            ..Default::default()
        };
        let found = filter_opportunities(&records, &filters, &favorites);
        assert_eq!(ids(&found), vec!["3"]);
    }

    #[test]
    fn test_filter_is_and_of_predicates() {
        let records = sample();
        let filters = Filters {
            selected_industries: set(&["Tech", "Law/Legal", "Environment"]),
            selected_opportunity_types: set(&["Internship", "Workshop", "Volunteering"]),
            search: "mi".into(),
            show_remote_only: false,
            ..Default::default()
        };
        for record in &records {
            let expected = matches_any(&filters.selected_industries, &record.tags)
                && filters.selected_opportunity_types.contains(&record.opportunity_type)
                && matches_search(&filters.search, record);
            assert_eq!(filters.matches(record), expected, "id={}", record.id);
        }
    }
}
