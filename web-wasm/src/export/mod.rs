//! ブラウザでのファイル出力

pub mod download;
