//! 並べ替え
//!
//! 安定ソート。降順は比較関数を反転させるので、同値のレコードは
//! 入力順を保つ。距離が無限大のレコードは方向に関係なく末尾。

use crate::geo::distance_from;
use crate::types::{Coordinates, Opportunity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// ソートキー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    None,
    Name,
    Organization,
    Date,
    Distance,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Name => "name",
            SortKey::Organization => "organization",
            SortKey::Date => "date",
            SortKey::Distance => "distance",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(SortKey::None),
            "name" => Ok(SortKey::Name),
            "organization" | "org" => Ok(SortKey::Organization),
            "date" => Ok(SortKey::Date),
            "distance" | "dist" => Ok(SortKey::Distance),
            _ => Err(format!(
                "Unknown sort key: {}. Use name, organization, date, distance, or none",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ソート方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// 並べ替えの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// 列見出しのクリック
    ///
    /// 同じ列なら方向を反転、別の列なら昇順でキーを切り替える。
    pub fn clicked(self, key: SortKey) -> Self {
        if self.key == key {
            Self { key, direction: self.direction.toggled() }
        } else {
            Self { key, direction: SortDirection::Asc }
        }
    }
}

/// 日付（解析できない値は None = 最も早い扱い）
fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// 距離の比較。無限大は方向に関係なく末尾
fn compare_distance(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => direction.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// 絞り込み結果を並べ替える
pub fn sort_opportunities<'a>(
    mut records: Vec<&'a Opportunity>,
    sort: SortState,
    user: Option<Coordinates>,
) -> Vec<&'a Opportunity> {
    let direction = sort.direction;

    match sort.key {
        SortKey::None => {}
        SortKey::Name => {
            records.sort_by(|a, b| direction.apply(compare_text(&a.name, &b.name)));
        }
        SortKey::Organization => {
            records.sort_by(|a, b| direction.apply(compare_text(&a.organization, &b.organization)));
        }
        SortKey::Date => {
            let mut keyed: Vec<(Option<NaiveDate>, &'a Opportunity)> = records
                .into_iter()
                .map(|opp| (parse_date(&opp.date), opp))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
            records = keyed.into_iter().map(|(_, opp)| opp).collect();
        }
        SortKey::Distance => {
            let mut keyed: Vec<(f64, &'a Opportunity)> = records
                .into_iter()
                .map(|opp| (distance_from(user, opp.coordinates), opp))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| compare_distance(*a, *b, direction));
            records = keyed.into_iter().map(|(_, opp)| opp).collect();
        }
    }

    records
}
