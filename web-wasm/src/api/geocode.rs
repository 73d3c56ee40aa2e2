//! 住所・郵便番号のジオコーディング（Nominatim）

use super::{get_text, js_error_message};
use opportunity_common::location::{parse_geocode_response, GEOCODE_URL};
use opportunity_common::{Coordinates, LocationError};

/// クエリ文字列のエンコード
fn encode(query: &str) -> String {
    String::from(js_sys::encode_uri_component(query))
}

pub fn geocode_url(query: &str) -> String {
    format!("{}?format=json&q={}", GEOCODE_URL, encode(query.trim()))
}

/// 1回だけ問い合わせる（リトライなし）
pub async fn geocode(query: &str) -> Result<Coordinates, LocationError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LocationError::NotFound("empty query".into()));
    }

    let body = get_text(&geocode_url(query)).await.map_err(|e| {
        let message = js_error_message(&e);
        gloo::console::warn!(format!("geocode failed: {}", message));
        LocationError::NotFound(message)
    })?;

    parse_geocode_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_geocode_url_encodes_query() {
        let url = geocode_url("  Austin, TX ");
        assert!(url.starts_with(GEOCODE_URL));
        assert!(url.ends_with("format=json&q=Austin%2C%20TX"));
    }
}
