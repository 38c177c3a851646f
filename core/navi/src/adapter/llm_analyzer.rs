//! LlmProvider で新規 Record の概要・対象・金額を求める RecordAnalyzer

use std::sync::Arc;

use common::error::Error;
use common::llm::LlmProvider;

use crate::domain::{Analysis, Candidate, ParsedAnalysis};
use crate::ports::outbound::RecordAnalyzer;

const SYSTEM_INSTRUCTION: &str = "あなたは日本の中小企業向け補助金・助成金の専門家です。\
与えられたお知らせのタイトルから、次のキーだけを持つ JSON オブジェクトを 1 つ返してください: \
\"summary\"（60 文字以内の概要）, \"target\"（対象者）, \"amount\"（補助金額・補助率。不明なら \"公式サイト参照\"）。\
JSON 以外の文章は出力しないでください。";

pub struct LlmRecordAnalyzer {
    provider: Arc<dyn LlmProvider>,
}

impl LlmRecordAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

fn build_query(candidate: &Candidate, tags: &[String]) -> String {
    let mut q = format!("タイトル: {}\nURL: {}", candidate.title, candidate.link);
    if !tags.is_empty() {
        q.push_str(&format!("\nタグ: {}", tags.join(", ")));
    }
    q
}

impl RecordAnalyzer for LlmRecordAnalyzer {
    fn analyze(&self, candidate: &Candidate, tags: &[String]) -> Result<ParsedAnalysis, Error> {
        let query = build_query(candidate, tags);
        let text = self
            .provider
            .complete(&query, Some(SYSTEM_INSTRUCTION))?
            .unwrap_or_default();
        Ok(Analysis::parse_llm_text(&text))
    }
}
