//! LLM プロバイダ層
//!
//! profiles.json によるプロバイダ解決と、Gemini / Chat Completions 形式の単発呼び出し。
//! HTTP は HttpClient ポート経由で送る。

pub mod echo;
pub mod factory;
pub mod gemini;
pub mod openai_compat;
pub mod profiles;
pub mod provider;

pub use echo::EchoProvider;
pub use factory::create_provider;
pub use profiles::{ProfileCatalog, ProviderKind, ProviderProfile, ResolvedProfile};
pub use provider::{ChatApi, HttpLlmProvider, LlmProvider, LLM_REQUEST_TIMEOUT};
