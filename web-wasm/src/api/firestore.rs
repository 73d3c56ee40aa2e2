//! Firestore REST から募集一覧を取得

use super::{get_text, js_error_message};
use opportunity_common::firestore::{list_documents_url, parse_list_response};
use opportunity_common::ingest::opportunities_from_page;
use opportunity_common::Opportunity;

/// ビルド時に指定（未指定なら既定のプロジェクト）
pub const PROJECT_ID: &str = match option_env!("OPPORTUNITY_FIRESTORE_PROJECT") {
    Some(project) => project,
    None => "youth-opportunity-finder",
};
pub const COLLECTION: &str = match option_env!("OPPORTUNITY_FIRESTORE_COLLECTION") {
    Some(collection) => collection,
    None => "opportunities",
};
const API_KEY: Option<&str> = option_env!("OPPORTUNITY_FIRESTORE_API_KEY");

/// 全ページを nextPageToken で辿って取得
pub async fn fetch_all() -> Result<Vec<Opportunity>, String> {
    let mut records = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let url = list_documents_url(PROJECT_ID, COLLECTION, API_KEY, page_token.as_deref());
        let body = get_text(&url).await.map_err(|e| js_error_message(&e))?;
        let page = parse_list_response(&body).map_err(|e| e.to_string())?;
        records.extend(opportunities_from_page(&page));

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    gloo::console::log!(format!("loaded {} opportunities", records.len()));
    Ok(records)
}
