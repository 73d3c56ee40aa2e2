//! 現在地の解決と保存
//!
//! - 住所/郵便番号のジオコーディング結果のパース
//! - 端末の位置情報エラーの分類
//! - キー・バリューストアへの保存（ブラウザはlocalStorage、CLIはJSONファイル）
//! - 1チャネル1リクエストの実行中ガード

use crate::types::{Coordinates, UserLocation};
use serde::Deserialize;
use thiserror::Error;

pub const GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// 端末位置情報の設定
pub const GEOLOCATION_HIGH_ACCURACY: bool = true;
pub const GEOLOCATION_TIMEOUT_MS: u32 = 15_000;

/// 端末の位置情報を使った場合のラベル
pub const MY_LOCATION_LABEL: &str = "My Location";

pub const GEOCODE_FAILED_MESSAGE: &str = "Couldn't find that place. Try a ZIP or 'City, State'.";
pub const GEOLOCATION_FAILED_MESSAGE: &str = "Could not get your location.";
pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation not supported in this browser.";

/// 位置解決のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    /// 結果0件・HTTPエラー・パース失敗はすべてここに集約
    #[error("place not found: {0}")]
    NotFound(String),

    #[error("geolocation unsupported")]
    Unsupported,

    #[error("geolocation permission denied: {0}")]
    PermissionDenied(String),

    #[error("geolocation timed out: {0}")]
    Timeout(String),

    #[error("geolocation unavailable: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// GeolocationPositionError のコードから分類
    ///
    /// 1: PERMISSION_DENIED, 2: POSITION_UNAVAILABLE, 3: TIMEOUT
    pub fn from_geolocation_code(code: u16, message: &str) -> Self {
        let message = message.trim().to_string();
        match code {
            1 => LocationError::PermissionDenied(message),
            3 => LocationError::Timeout(message),
            _ => LocationError::Unavailable(message),
        }
    }

    /// 利用者向けメッセージ
    ///
    /// ジオコーディングは原因に関係なく固定文言、
    /// 位置情報は端末のメッセージがあればそれを使う。
    pub fn user_message(&self) -> String {
        match self {
            LocationError::NotFound(_) => GEOCODE_FAILED_MESSAGE.to_string(),
            LocationError::Unsupported => GEOLOCATION_UNSUPPORTED_MESSAGE.to_string(),
            LocationError::PermissionDenied(msg)
            | LocationError::Timeout(msg)
            | LocationError::Unavailable(msg) => {
                if msg.is_empty() {
                    GEOLOCATION_FAILED_MESSAGE.to_string()
                } else {
                    msg.clone()
                }
            }
        }
    }
}

#[derive(Deserialize)]
struct GeocodeHit {
    lat: GeocodeNumber,
    lon: GeocodeNumber,
}

/// Nominatimは数値を文字列で返す
#[derive(Deserialize)]
#[serde(untagged)]
enum GeocodeNumber {
    Text(String),
    Number(f64),
}

impl GeocodeNumber {
    fn value(&self) -> Option<f64> {
        match self {
            GeocodeNumber::Text(s) => s.trim().parse().ok(),
            GeocodeNumber::Number(n) => Some(*n),
        }
    }
}

/// ジオコーディングのレスポンスをパース（先頭の結果を採用）
pub fn parse_geocode_response(body: &str) -> Result<Coordinates, LocationError> {
    let hits: Vec<GeocodeHit> = serde_json::from_str(body)
        .map_err(|e| LocationError::NotFound(format!("invalid response: {}", e)))?;

    let first = hits
        .first()
        .ok_or_else(|| LocationError::NotFound("no results".into()))?;

    match (first.lat.value(), first.lon.value()) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng)
            .ok_or_else(|| LocationError::NotFound("non-finite coordinates".into())),
        _ => Err(LocationError::NotFound("unparsable coordinates".into())),
    }
}

// ============================================
// 永続化
// ============================================

/// 文字列のキー・バリューストア
pub trait KeyValueStore {
    type Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// 保存先のキー名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationKeys {
    pub coords: String,
    pub label: String,
}

impl Default for LocationKeys {
    fn default() -> Self {
        Self {
            coords: "yc_user_coords".into(),
            label: "yc_user_label".into(),
        }
    }
}

/// 現在地の保存・読み込み
///
/// 座標はJSON `{"lat":..,"lng":..}`、ラベルは平文で別キーに保存する。
pub struct LocationStore<S> {
    store: S,
    keys: LocationKeys,
}

impl<S: KeyValueStore> LocationStore<S> {
    pub fn new(store: S, keys: LocationKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &LocationKeys {
        &self.keys
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn save(&mut self, location: &UserLocation) -> Result<(), S::Error> {
        // Coordinates のシリアライズは失敗しない
        let coords = serde_json::to_string(&location.coords).unwrap_or_default();
        self.store.set(&self.keys.coords, &coords)?;
        self.store.set(&self.keys.label, &location.label)
    }

    /// 保存済みの現在地
    ///
    /// 座標が無い・壊れている場合は None。ラベルが無ければ空文字。
    pub fn load(&self) -> Result<Option<UserLocation>, S::Error> {
        let Some(raw) = self.store.get(&self.keys.coords)? else {
            return Ok(None);
        };
        let Some(coords) = serde_json::from_str::<Coordinates>(&raw)
            .ok()
            .and_then(|c| Coordinates::new(c.lat, c.lng))
        else {
            return Ok(None);
        };
        let label = self.store.get(&self.keys.label)?.unwrap_or_default();
        Ok(Some(UserLocation { coords, label }))
    }

    /// 保存済みのラベル（モーダルの初期値用）
    pub fn saved_label(&self) -> Result<String, S::Error> {
        Ok(self.store.get(&self.keys.label)?.unwrap_or_default())
    }

    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.store.remove(&self.keys.coords)?;
        self.store.remove(&self.keys.label)
    }
}

/// メモリ上のストア（テスト・フォールバック用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================
// 実行中ガード
// ============================================

/// 1チャネルにつき最新のリクエストだけを有効にする
///
/// `begin` で発行したチケットより新しいチケットが発行されていれば、
/// 古いリクエストの結果は `finish` で捨てられる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGuard {
    latest: u64,
    in_flight: bool,
}

/// リクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGuard {
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight = true;
        Ticket(self.latest)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.in_flight && ticket.0 == self.latest
    }

    /// 完了を記録し、結果を使うべきか返す
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    /// 実行中のリクエストを無効化する（モーダルを閉じた場合など）
    pub fn cancel(&mut self) {
        self.in_flight = false;
    }
}
