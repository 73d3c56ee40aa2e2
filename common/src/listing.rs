//! 募集一覧ストア
//!
//! 起動時に一度だけ読み込む。読み込み後は変更しない。

use crate::types::Opportunity;
use std::collections::HashSet;

/// 読み込み状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// 取得失敗（一覧は空のまま、メッセージを表示する）
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingStore {
    records: Vec<Opportunity>,
    status: LoadStatus,
}

impl ListingStore {
    /// 取得結果から生成
    ///
    /// IDの重複は先に出現したものを採用する。
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<Opportunity>, E>) -> Self {
        match result {
            Ok(records) => Self::loaded(records),
            Err(e) => Self::failed(e.to_string()),
        }
    }

    pub fn loaded(records: Vec<Opportunity>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|opp| seen.insert(opp.id.clone()))
            .collect();
        Self { records, status: LoadStatus::Ready }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { records: Vec::new(), status: LoadStatus::Failed(message.into()) }
    }

    pub fn records(&self) -> &[Opportunity] {
        &self.records
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn get(&self, id: &str) -> Option<&Opportunity> {
        self.records.iter().find(|opp| opp.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
