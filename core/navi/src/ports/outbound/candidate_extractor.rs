use crate::domain::{Candidate, ParseError};

/// マークアップから候補を文書順で取り出す（正規化・重複排除・件数上限まで済ませる）
pub trait CandidateExtractor: Send + Sync {
    fn extract(&self, markup: &str) -> Result<Vec<Candidate>, ParseError>;
}
