//! 募集情報の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Opportunity: 取り込み済みの募集レコード（読み込み後は不変）
//! - Coordinates: 緯度経度
//! - Recurrence: 繰り返し開催の区分（取り込み時に判定）
//! - UserLocation: 利用者の現在地（距離ソート用）

use serde::{Deserialize, Serialize};

/// リモート開催を表す値（完全一致で判定）
pub const REMOTE: &str = "Remote";

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// 両方が有限値の場合のみ生成
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// 繰り返し開催の区分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recurrence {
    Recurring,
    NonRecurring,
    #[default]
    Unknown,
}

impl Recurrence {
    /// 自由記述の回答を区分に変換
    ///
    /// 大文字小文字・記号・空白の揺れは無視する。
    /// "Non-Recurring!" / "non recurring" / "No" → NonRecurring
    pub fn classify(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        if normalized.is_empty() {
            return Recurrence::Unknown;
        }

        const NON_RECURRING: &[&str] = &["no", "false", "once", "onetime", "single"];
        const RECURRING: &[&str] = &[
            "yes", "true", "daily", "weekly", "biweekly", "monthly", "yearly", "annually",
            "annual", "ongoing",
        ];

        if normalized.starts_with("non")
            || normalized.starts_with("not")
            || NON_RECURRING.contains(&normalized.as_str())
        {
            Recurrence::NonRecurring
        } else if normalized.contains("recurring") || RECURRING.contains(&normalized.as_str()) {
            Recurrence::Recurring
        } else {
            Recurrence::Unknown
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, Recurrence::Recurring)
    }
}

/// 募集レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub organization: String,

    /// "City, State" 形式の自由記述
    pub location: String,

    pub age_groups: Vec<String>,
    pub opportunity_type: String,

    /// 業界タグ（順序保持・重複は除去しない）
    pub tags: Vec<String>,

    pub description: String,
    pub contact: String,

    /// ゼロ埋めISO形式の日付（YYYY-MM-DD）
    pub date: String,

    /// 表示用の日時文字列（ソートには使わない）
    pub date_time: String,

    pub remote_type: String,

    /// 繰り返し区分と元の回答
    pub recurrence: Recurrence,
    pub recurrence_text: String,

    pub coordinates: Option<Coordinates>,
}

impl Opportunity {
    pub fn is_remote(&self) -> bool {
        self.remote_type == REMOTE
    }
}

/// 利用者の現在地
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub coords: Coordinates,
    pub label: String,
}
