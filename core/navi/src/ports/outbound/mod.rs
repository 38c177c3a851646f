//! Outbound ポート: パイプラインが外界に求める能力

pub mod candidate_extractor;
pub mod record_analyzer;
pub mod record_store;
pub mod site_renderer;
pub mod source_fetcher;

pub use candidate_extractor::CandidateExtractor;
pub use record_analyzer::RecordAnalyzer;
pub use record_store::RecordStore;
pub use site_renderer::{SiteRenderer, SiteView};
pub use source_fetcher::{FetchedPage, SourceFetcher};
