//! 1 回の実行分の設定（CLI から一度だけ組み立て、各コンポーネントへ明示的に渡す）

use std::path::PathBuf;
use std::time::Duration;

use common::domain::{ModelName, ProviderName};
use common::error::Error;

use super::store::RetentionCap;
use super::tag::TagVocabulary;

pub const DEFAULT_SOURCE_URL: &str = "https://j-net21.smrj.go.jp/snavi/articles";
pub const DEFAULT_STORE_PATH: &str = "subsidies.json";
pub const DEFAULT_OUT_DIR: &str = "public";
pub const DEFAULT_SELECTOR: &str = "a[href]";
pub const DEFAULT_LINK_PATTERN: &str = r"/snavi/articles/\d+";
pub const DEFAULT_MIN_TITLE_CHARS: usize = 5;
pub const DEFAULT_MAX_CANDIDATES: usize = 30;
pub const DEFAULT_RENDER_LIMIT: usize = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ja,en;q=0.8";
pub const DEFAULT_USER_AGENT: &str = concat!("navi/", env!("CARGO_PKG_VERSION"));

/// 取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: String,
    /// scheme://host[:port]（相対 href の解決に使う）
    pub origin: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl SourceConfig {
    /// URL を検証して origin を求める。http(s) 以外や origin を持たない URL は usage エラー。
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::invalid_argument(format!("invalid --source-url '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_argument(format!(
                "--source-url must be http or https: {}",
                url
            )));
        }
        let origin = parsed.origin().ascii_serialization();
        if origin == "null" {
            return Err(Error::invalid_argument(format!(
                "--source-url has no origin: {}",
                url
            )));
        }
        if timeout.is_zero() {
            return Err(Error::invalid_argument("--timeout-secs must be at least 1"));
        }
        Ok(Self {
            url: url.to_string(),
            origin,
            timeout,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        })
    }
}

/// 一覧ページからの抽出規則
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRules {
    pub selector: String,
    pub link_pattern: String,
    pub min_title_chars: usize,
    pub max_candidates: usize,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            min_title_chars: DEFAULT_MIN_TITLE_CHARS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// 出力サイト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub out_dir: PathBuf,
    pub render_limit: usize,
    /// 指定時のみ sitemap.xml を出す
    pub site_url: Option<String>,
    /// 相談フォームへのリンク
    pub form_url: Option<String>,
}

/// --analyze 指定時の LLM 設定
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyzeConfig {
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub extract: ExtractRules,
    pub store_path: PathBuf,
    pub retention_cap: RetentionCap,
    pub render: RenderConfig,
    /// None なら分析しない
    pub analyze: Option<AnalyzeConfig>,
    pub dry_run: bool,
    pub vocabulary: TagVocabulary,
}

impl PipelineConfig {
    /// 既定値で組み立てる（テストと CLI の起点）
    pub fn with_defaults() -> Result<Self, Error> {
        Ok(Self {
            source: SourceConfig::new(
                DEFAULT_SOURCE_URL,
                Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            )?,
            extract: ExtractRules::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            retention_cap: RetentionCap::default(),
            render: RenderConfig {
                out_dir: PathBuf::from(DEFAULT_OUT_DIR),
                render_limit: DEFAULT_RENDER_LIMIT,
                site_url: None,
                form_url: None,
            },
            analyze: None,
            dry_run: false,
            vocabulary: TagVocabulary::default(),
        })
    }
}
