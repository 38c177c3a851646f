use crate::domain::FetchError;

/// 取得してデコードした一覧ページ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub markup: String,
    /// 不正な UTF-8 を置換文字に置き換えたか
    pub lossy: bool,
}

/// 取得元から一覧ページを 1 回だけ取りに行く（リトライしない）
pub trait SourceFetcher: Send + Sync {
    fn fetch(&self) -> Result<FetchedPage, FetchError>;
}
