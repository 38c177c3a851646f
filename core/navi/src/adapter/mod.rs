//! ポートの標準実装

pub mod html_renderer;
pub mod http_source_fetcher;
pub mod json_record_store;
pub mod listing_extractor;
pub mod llm_analyzer;

pub use html_renderer::HtmlSiteRenderer;
pub use http_source_fetcher::HttpSourceFetcher;
pub use json_record_store::JsonRecordStore;
pub use listing_extractor::ScraperExtractor;
pub use llm_analyzer::LlmRecordAnalyzer;
