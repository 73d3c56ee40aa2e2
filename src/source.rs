//! 募集一覧の取得
//!
//! - Firestore REST（全ページを nextPageToken で辿る）
//! - ローカルのJSONファイル

use crate::config::Config;
use crate::error::{FinderError, Result};
use opportunity_common::firestore::{list_documents_url, parse_list_response};
use opportunity_common::ingest::{opportunities_from_file, opportunities_from_page};
use opportunity_common::Opportunity;
use std::path::Path;
use std::time::Duration;

/// 取得元
#[derive(Debug, Clone)]
pub enum Source<'a> {
    Firestore {
        project_id: String,
        collection: &'a str,
        api_key: Option<String>,
    },
    File(&'a Path),
}

impl<'a> Source<'a> {
    /// --input があればファイル、無ければ設定のFirestore
    pub fn resolve(config: &'a Config, input: Option<&'a Path>) -> Result<Self> {
        match input {
            Some(path) => Ok(Source::File(path)),
            None => Ok(Source::Firestore {
                project_id: config.project_id()?,
                collection: &config.collection,
                api_key: config.api_key(),
            }),
        }
    }
}

pub async fn fetch_opportunities(source: &Source<'_>, config: &Config) -> Result<Vec<Opportunity>> {
    match source {
        Source::File(path) => {
            if !path.exists() {
                return Err(FinderError::FileNotFound(path.display().to_string()));
            }
            tracing::debug!(path = %path.display(), "JSONファイルから読み込み");
            Ok(opportunities_from_file(path)?)
        }
        Source::Firestore { project_id, collection, api_key } => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()?;
            fetch_all_pages(&client, project_id, collection, api_key.as_deref()).await
        }
    }
}

async fn fetch_all_pages(
    client: &reqwest::Client,
    project_id: &str,
    collection: &str,
    api_key: Option<&str>,
) -> Result<Vec<Opportunity>> {
    let mut records = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let url = list_documents_url(project_id, collection, api_key, page_token.as_deref());
        tracing::debug!(page = ?page_token, "Firestoreから取得中");

        let response = client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FinderError::Fetch(format!("HTTP {}: {}", status, body.trim())));
        }

        let page = parse_list_response(&body)?;
        records.extend(opportunities_from_page(&page));

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::info!(count = records.len(), "一覧を取得しました");
    Ok(records)
}
