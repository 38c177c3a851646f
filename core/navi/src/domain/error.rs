//! パイプライン内のエラー分類
//!
//! FetchError / ParseError は回復可能（警告ログを出して空の値で続行）。
//! PersistenceError だけが致命的で、common の Error::Io に変換して終了コードに載せる。

use std::path::PathBuf;

use common::error::Error;
use thiserror::Error as ThisError;

/// 取得失敗（通信・タイムアウト・非 2xx）
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum FetchError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("timed out fetching {url}")]
    Timeout { url: String },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
        }
    }

    /// HttpClient ポートのエラーを分類する
    pub fn from_transport(url: &str, err: Error) -> Self {
        match err {
            Error::Timeout(_) => Self::Timeout {
                url: url.to_string(),
            },
            other => Self::Network {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// 読めない入力（壊れたストア、使えないマークアップ）
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ParseError {
    #[error("store {path} is unreadable: {message}")]
    Store { path: PathBuf, message: String },
    #[error("unusable markup: {0}")]
    Markup(String),
}

/// ストアの書き込み失敗（致命的）
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("failed to persist store {path}: {message}")]
pub struct PersistenceError {
    pub path: PathBuf,
    pub message: String,
}

impl From<PersistenceError> for Error {
    fn from(e: PersistenceError) -> Self {
        Error::io_msg(e.to_string())
    }
}
