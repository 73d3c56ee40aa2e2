//! 取り込み処理
//!
//! データソースのレコード（長い設問文をキーとするマップ）を
//! Opportunity に変換する。空白のトリム以外の検証は行わない。

use crate::error::{Error, Result};
use crate::firestore::ListDocumentsPage;
use crate::types::{Coordinates, Opportunity, Recurrence};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// データソースのフィールド名
pub mod fields {
    pub const NAME: &str = "What is the name of your opportunity?";
    pub const ORGANIZATION: &str = "Organization Name";
    pub const LOCATION: &str = "City, State";
    pub const AGE_GROUP: &str = "What is the suggested age group?";
    pub const OPPORTUNITY_TYPE: &str = "Opportunity Type";
    pub const INDUSTRY_TAGS: &str = "Industry Tags";
    pub const DESCRIPTION: &str = "Detailed description of the event";
    pub const CONTACT: &str = "E-mail Address";
    pub const EVENT_DATE_TIME: &str = "EventDateTime";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const REMOTE_TYPE: &str = "Is the opportunity remote or in-person";
    pub const RECURRING: &str = "Is the event recurring?";
}

/// 1件のレコードを変換
pub fn opportunity_from_fields(id: &str, record: &Map<String, Value>) -> Opportunity {
    let (date, date_time) = split_event_date_time(&text_field(record, fields::EVENT_DATE_TIME));
    let recurrence_text = text_field(record, fields::RECURRING);

    Opportunity {
        id: id.trim().to_string(),
        name: text_field(record, fields::NAME),
        organization: text_field(record, fields::ORGANIZATION),
        location: text_field(record, fields::LOCATION),
        age_groups: list_field(record, fields::AGE_GROUP),
        opportunity_type: text_field(record, fields::OPPORTUNITY_TYPE),
        tags: list_field(record, fields::INDUSTRY_TAGS),
        description: text_field(record, fields::DESCRIPTION),
        contact: text_field(record, fields::CONTACT),
        date,
        date_time,
        remote_type: text_field(record, fields::REMOTE_TYPE),
        recurrence: Recurrence::classify(&recurrence_text),
        recurrence_text,
        coordinates: coordinates_field(record),
    }
}

/// Firestoreの1ページ分を変換
pub fn opportunities_from_page(page: &ListDocumentsPage) -> Vec<Opportunity> {
    page.documents
        .iter()
        .map(|doc| opportunity_from_fields(doc.id(), &doc.plain_fields()))
        .collect()
}

/// 素のJSONから変換
///
/// 受け付ける形式:
/// - `[{"id": "...", ...}, ...]`
/// - `{"<id>": {...}, ...}`
pub fn opportunities_from_json(json: &str) -> Result<Vec<Opportunity>> {
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let record = item
                    .as_object()
                    .ok_or_else(|| Error::Parse(format!("{}件目がオブジェクトではありません", index + 1)))?;
                let id = record
                    .get("id")
                    .and_then(scalar_text)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| Error::Parse(format!("{}件目に id がありません", index + 1)))?;
                Ok(opportunity_from_fields(&id, record))
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(id, item)| {
                let record = item
                    .as_object()
                    .ok_or_else(|| Error::Parse(format!("{} がオブジェクトではありません", id)))?;
                Ok(opportunity_from_fields(id, record))
            })
            .collect(),
        _ => Err(Error::Parse("配列またはオブジェクトが必要です".into())),
    }
}

/// JSONファイルから読み込み（非WASM環境のみ）
#[cfg(not(feature = "wasm"))]
pub fn opportunities_from_file(path: &std::path::Path) -> Result<Vec<Opportunity>> {
    let content = std::fs::read_to_string(path)?;
    opportunities_from_json(&content)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(record: &Map<String, Value>, key: &str) -> String {
    record.get(key).and_then(scalar_text).unwrap_or_default()
}

/// カンマ区切りの文字列、または配列を分割・トリムする
fn list_field(record: &Map<String, Value>, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::String(s)) => split_list(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_text)
            .flat_map(|s| split_list(&s))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn number_field(record: &Map<String, Value>, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coordinates_field(record: &Map<String, Value>) -> Option<Coordinates> {
    let lat = number_field(record, fields::LATITUDE)?;
    let lng = number_field(record, fields::LONGITUDE)?;
    Coordinates::new(lat, lng)
}

/// 日時フィールドを (ソート用日付, 表示用日時) に分割
///
/// 解析できない値は日付を空にし、表示用には元の文字列をそのまま使う。
pub fn split_event_date_time(raw: &str) -> (String, String) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (String::new(), String::new());
    }

    if let Some(dt) = parse_date_time(raw) {
        return (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        );
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return (date.format("%Y-%m-%d").to_string(), date.format("%b %-d, %Y").to_string());
    }

    (String::new(), raw.to_string())
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        // 表示は入力に記録された現地時刻で行う
        return Some(dt.naive_local());
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
