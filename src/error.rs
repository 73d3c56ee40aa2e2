use opportunity_common::LocationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("FirestoreのプロジェクトIDが設定されていません。`opportunity-finder config --set-project YOUR_PROJECT` で設定するか、--input でJSONファイルを指定してください")]
    MissingProject,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("一覧の取得に失敗: {0}")]
    Fetch(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{}", .0.user_message())]
    Location(#[from] LocationError),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] opportunity_common::Error),
}

pub type Result<T> = std::result::Result<T, FinderError>;
