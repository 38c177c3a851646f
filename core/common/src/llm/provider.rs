//! LLM プロバイダのトレイトと、HttpClient ポート越しに呼ぶ共通実装

use crate::error::Error;
use crate::ports::outbound::{HttpClient, HttpRequest};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// LLM API 呼び出しのタイムアウト（一覧取得とは別枠）
pub const LLM_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// 単発のテキスト補完
///
/// 1 回のプロンプトで全文応答を受け取る。応答にテキストが無ければ Ok(None)。
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    fn complete(&self, query: &str, system_instruction: Option<&str>) -> Result<Option<String>, Error>;
}

/// プロバイダごとの API 形式（リクエストの組み立てと応答からのテキスト抽出）
pub trait ChatApi: Send + Sync {
    fn name(&self) -> &'static str;

    fn request(&self, query: &str, system_instruction: Option<&str>) -> Result<HttpRequest, Error>;

    fn response_text(&self, response: &Value) -> Option<String>;
}

/// ChatApi を HttpClient で送る LlmProvider
pub struct HttpLlmProvider<A> {
    api: A,
    http: Arc<dyn HttpClient>,
}

impl<A: ChatApi> HttpLlmProvider<A> {
    pub fn new(api: A, http: Arc<dyn HttpClient>) -> Self {
        Self { api, http }
    }
}

impl<A: ChatApi> LlmProvider for HttpLlmProvider<A> {
    fn name(&self) -> &str {
        self.api.name()
    }

    fn complete(&self, query: &str, system_instruction: Option<&str>) -> Result<Option<String>, Error> {
        let request = self.api.request(query, system_instruction)?;
        let response = self.http.send(&request)?;
        let text = response.text();
        if !response.is_success() {
            return Err(Error::http(format!(
                "{} API error: {}",
                self.api.name(),
                api_error_message(response.status, &text)
            )));
        }
        let v: Value = serde_json::from_str(&text)
            .map_err(|e| Error::json(format!("Failed to parse {} response: {}", self.api.name(), e)))?;
        // 200 でも error オブジェクトを返す互換サーバがある
        if let Some(err) = v.get("error").filter(|e| !e.is_null()) {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("{} API error: {}", self.api.name(), msg)));
        }
        Ok(self.api.response_text(&v))
    }
}

/// 非 2xx レスポンスの本文から API のエラーメッセージを取り出す
fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body.trim()))
}
