//! HTTP クライアント Outbound ポート
//!
//! 一覧ページの GET と LLM API への JSON POST の両方がこのポートを通る。リトライはしない。

use crate::error::Error;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 1 回分のリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// 追加ヘッダ（User-Agent / Accept-Language / Authorization 等）
    pub headers: Vec<(String, String)>,
    /// POST の本文（JSON）
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Content-Type: application/json 付きの POST
    pub fn post_json(url: impl Into<String>, body: String, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
            timeout,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// レスポンス（ステータスと生のボディ）
///
/// 非 2xx もエラーにせずそのまま返す。判定は呼び出し側の責務。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 本文を UTF-8 として読む（不正なバイト列は置換文字）
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP クライアント抽象
///
/// 実装は `common::adapter::ReqwestHttpClient` やテスト用の固定レスポンスなど。
/// 接続失敗は `Error::Http`、タイムアウトは `Error::Timeout` で返す。
pub trait HttpClient: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}
