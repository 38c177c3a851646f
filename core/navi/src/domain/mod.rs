//! navi のドメイン型（I/O を持たない）

pub mod analysis;
pub mod config;
pub mod error;
pub mod jst;
pub mod record;
pub mod store;
pub mod tag;

pub use analysis::{Analysis, ParsedAnalysis};
pub use config::{AnalyzeConfig, ExtractRules, PipelineConfig, RenderConfig, SourceConfig};
pub use error::{FetchError, ParseError, PersistenceError};
pub use record::{normalize_title, Candidate, Record};
pub use store::{RetentionCap, Store};
pub use tag::TagVocabulary;
