//! Gemini generateContent API

use crate::error::Error;
use crate::llm::provider::{ChatApi, LLM_REQUEST_TIMEOUT};
use crate::ports::outbound::HttpRequest;
use serde_json::{json, Value};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiApi {
    model: String,
    api_key: String,
}

impl GeminiApi {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
        }
    }
}

impl ChatApi for GeminiApi {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn request(&self, query: &str, system_instruction: Option<&str>) -> Result<HttpRequest, Error> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": query }] }]
        });
        if let Some(system) = system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        let url = format!("{}/{}:generateContent?key={}", ENDPOINT, self.model, self.api_key);
        Ok(HttpRequest::post_json(url, body.to_string(), LLM_REQUEST_TIMEOUT))
    }

    fn response_text(&self, response: &Value) -> Option<String> {
        // parts が複数に分かれて返ることがある
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        Some(text).filter(|t| !t.is_empty())
    }
}
