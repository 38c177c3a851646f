use std::path::PathBuf;

use common::error::Error;

use crate::domain::{Record, TagVocabulary};

/// 描画に渡すスナップショット
#[derive(Debug, Clone, Copy)]
pub struct SiteView<'a> {
    /// 新しい順
    pub records: &'a [Record],
    pub vocabulary: &'a TagVocabulary,
    pub now_ms: u64,
}

/// 静的サイトを書き出す。書いたファイルのパスを返す。
pub trait SiteRenderer: Send + Sync {
    fn render(&self, view: &SiteView<'_>) -> Result<Vec<PathBuf>, Error>;
}
