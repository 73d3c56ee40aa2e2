//! 住所・郵便番号のジオコーディング（1操作1リクエスト、リトライなし）

use crate::config::Config;
use crate::error::Result;
use opportunity_common::location::parse_geocode_response;
use opportunity_common::{Coordinates, LocationError};
use std::time::Duration;

pub async fn geocode(config: &Config, query: &str) -> Result<Coordinates> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LocationError::NotFound("empty query".into()).into());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .build()?;

    let response = client
        .get(&config.geocode_url)
        .query(&[("format", "json"), ("q", query)])
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| LocationError::NotFound(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LocationError::NotFound(format!("HTTP {}", response.status())).into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| LocationError::NotFound(e.to_string()))?;

    let coords = parse_geocode_response(&body)?;
    tracing::debug!(query, lat = coords.lat, lng = coords.lng, "ジオコーディング成功");
    Ok(coords)
}
