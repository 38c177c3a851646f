use common::error::Error;

use crate::domain::{Candidate, ParsedAnalysis};

/// 新規 Record の要約・対象・金額を求める
///
/// プロバイダの失敗は Err、応答の不備は ParsedAnalysis.defaulted に現れる。
pub trait RecordAnalyzer: Send + Sync {
    fn analyze(&self, candidate: &Candidate, tags: &[String]) -> Result<ParsedAnalysis, Error>;
}
