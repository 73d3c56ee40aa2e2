//! Firestore REST レスポンスのデコード
//!
//! `documents.list` のレスポンスは型付きの値（stringValue, integerValue ...）で
//! 返ってくるため、取り込み前に素のJSONマップへ変換する。

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// 1回のリクエストで取得する件数
pub const PAGE_SIZE: u32 = 300;

/// `documents.list` の1ページ
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDocumentsPage {
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

/// Firestoreドキュメント
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    /// projects/{p}/databases/(default)/documents/{collection}/{id}
    pub name: String,
    pub fields: Map<String, Value>,
}

impl Document {
    /// ドキュメントIDはパスの末尾
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// 型付きフィールドを素のJSONマップに変換
    pub fn plain_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), decode_value(value)))
            .collect()
    }
}

/// 一覧取得URLを組み立てる
pub fn list_documents_url(
    project_id: &str,
    collection: &str,
    api_key: Option<&str>,
    page_token: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/projects/{}/databases/(default)/documents/{}?pageSize={}",
        FIRESTORE_BASE_URL, project_id, collection, PAGE_SIZE
    );
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        url.push_str("&key=");
        url.push_str(&urlencoding::encode(key));
    }
    if let Some(token) = page_token.filter(|t| !t.is_empty()) {
        // トークンは + / = を含むのでエンコードする
        url.push_str("&pageToken=");
        url.push_str(&urlencoding::encode(token));
    }
    url
}

/// レスポンス本文をパース
pub fn parse_list_response(body: &str) -> Result<ListDocumentsPage> {
    let page: ListDocumentsPage = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("Firestoreレスポンスのパースに失敗: {}", e)))?;
    Ok(page)
}

/// 型付きの値を素のJSONに変換
///
/// 未知の型や壊れた値は null として扱う。
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "booleanValue" => inner.clone(),
        "nullValue" => Value::Null,
        // integerValue は文字列で返る
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or(Value::Null),
            Value::Number(_) => inner.clone(),
            _ => Value::Null,
        },
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "geoPointValue" => {
            let lat = inner.get("latitude").cloned().unwrap_or(Value::Null);
            let lng = inner.get("longitude").cloned().unwrap_or(Value::Null);
            serde_json::json!({ "lat": lat, "lng": lng })
        }
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), decode_value(v)))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}
