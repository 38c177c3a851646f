//! 解決済みプロファイルから LlmProvider を組み立てる

use crate::domain::ModelName;
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::{self, GeminiApi};
use crate::llm::openai_compat::{self, ChatCompletionsApi};
use crate::llm::profiles::{ProviderKind, ResolvedProfile};
use crate::llm::provider::{HttpLlmProvider, LlmProvider};
use crate::ports::outbound::{EnvResolver, HttpClient};
use std::sync::Arc;

/// `model_override` は -m/--model。指定があればプロファイルの model より優先する。
/// API キーが必須のプロバイダで環境変数が無ければ Error::Env。
pub fn create_provider(
    resolved: &ResolvedProfile,
    model_override: Option<&ModelName>,
    env: &dyn EnvResolver,
    http: Arc<dyn HttpClient>,
) -> Result<Arc<dyn LlmProvider>, Error> {
    let p = &resolved.profile;
    let model = |fallback: &str| -> String {
        model_override
            .map(|m| m.to_string())
            .or_else(|| p.model.clone())
            .unwrap_or_else(|| fallback.to_string())
    };
    let key_env = |fallback: &'static str| p.api_key_env.clone().unwrap_or_else(|| fallback.to_string());

    let provider: Arc<dyn LlmProvider> = match p.kind {
        ProviderKind::Echo => Arc::new(EchoProvider::new()),
        ProviderKind::Gemini => {
            let key = env.require(&key_env(gemini::DEFAULT_API_KEY_ENV))?;
            let api = GeminiApi::new(model(gemini::DEFAULT_MODEL), key);
            Arc::new(HttpLlmProvider::new(api, http))
        }
        ProviderKind::Openai => {
            let key = env.require(&key_env(openai_compat::DEFAULT_API_KEY_ENV))?;
            let api = ChatCompletionsApi::new(p.base_url.as_deref(), model(openai_compat::DEFAULT_MODEL), Some(key))
                .temperature(p.temperature);
            Arc::new(HttpLlmProvider::new(api, http))
        }
        ProviderKind::OpenaiCompat => {
            let key = p.api_key_env.as_deref().and_then(|name| env.var(name));
            let api = ChatCompletionsApi::new(p.base_url.as_deref(), model(openai_compat::DEFAULT_MODEL), key)
                .temperature(p.temperature);
            Arc::new(HttpLlmProvider::new(api, http))
        }
    };
    Ok(provider)
}
