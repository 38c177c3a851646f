//! 通信しないプロバイダ
//!
//! 送ったクエリをそのまま応答として返す。API キー無しでの動作確認用。

use crate::error::Error;
use crate::llm::provider::LlmProvider;

#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn complete(&self, query: &str, _system_instruction: Option<&str>) -> Result<Option<String>, Error> {
        Ok(Some(query.to_string()))
    }
}
