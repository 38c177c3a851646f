//! OpenAI Chat Completions 形式 (/chat/completions)
//!
//! OpenAI 本家と、base_url で指す互換サーバ（Ollama 等）の両方をこの型で扱う。

use crate::error::Error;
use crate::llm::provider::{ChatApi, LLM_REQUEST_TIMEOUT};
use crate::ports::outbound::HttpRequest;
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_TEMPERATURE: f64 = 0.3;

pub struct ChatCompletionsApi {
    endpoint: String,
    model: String,
    /// None のとき Authorization ヘッダを付けない（ローカルサーバ向け）
    api_key: Option<String>,
    temperature: f64,
}

impl ChatCompletionsApi {
    pub fn new(base_url: Option<&str>, model: impl Into<String>, api_key: Option<String>) -> Self {
        let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Self {
            endpoint: format!("{}/chat/completions", base),
            model: model.into(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn temperature(mut self, temperature: Option<f64>) -> Self {
        if let Some(t) = temperature {
            self.temperature = t;
        }
        self
    }
}

impl ChatApi for ChatCompletionsApi {
    fn name(&self) -> &'static str {
        "openai_compat"
    }

    fn request(&self, query: &str, system_instruction: Option<&str>) -> Result<HttpRequest, Error> {
        let messages: Vec<Value> = system_instruction
            .map(|s| json!({ "role": "system", "content": s }))
            .into_iter()
            .chain(std::iter::once(json!({ "role": "user", "content": query })))
            .collect();
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "stream": false
        });
        let req = HttpRequest::post_json(self.endpoint.as_str(), body.to_string(), LLM_REQUEST_TIMEOUT);
        Ok(match &self.api_key {
            Some(key) => req.header("Authorization", &format!("Bearer {}", key)),
            None => req,
        })
    }

    fn response_text(&self, response: &Value) -> Option<String> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> ChatCompletionsApi {
        ChatCompletionsApi::new(Some("http://localhost:11434/v1/"), "local-model", None).temperature(Some(0.5))
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let req = local().request("Hello", None).unwrap();
        assert_eq!(req.url, "http://localhost:11434/v1/chat/completions");
        assert!(req.header_value("Authorization").is_none());
    }

    #[test]
    fn test_request_messages_and_options() {
        let req = local().request("Hello", Some("You classify subsidies")).unwrap();
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "Hello");
        assert_eq!(body["model"], "local-model");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_bearer_header_when_key_present() {
        let api = ChatCompletionsApi::new(None, DEFAULT_MODEL, Some("sk-test".to_string()));
        let req = api.request("q", None).unwrap();
        assert_eq!(req.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(req.header_value("authorization"), Some("Bearer sk-test"));
    }

    #[test]
    fn test_response_text() {
        let v: Value =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#).unwrap();
        assert_eq!(local().response_text(&v).as_deref(), Some("ok"));
    }
}
