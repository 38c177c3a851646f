//! 配線: 標準アダプタで PipelineUseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{
    JsonlLog, ReqwestHttpClient, StderrLog, StdClock, StdEnvResolver, StdFileSystem, TeeLog,
};
use common::error::Error;
use common::llm::{create_provider, ProfileCatalog};
use common::ports::outbound::{FileSystem, HttpClient, Log, LogLevel};

use crate::adapter::{
    HtmlSiteRenderer, HttpSourceFetcher, JsonRecordStore, LlmRecordAnalyzer, ScraperExtractor,
};
use crate::domain::{AnalyzeConfig, PipelineConfig};
use crate::ports::outbound::RecordAnalyzer;
use crate::usecase::pipeline::{PipelineDeps, PipelineUseCase, SourceDeps, SystemDeps};

const DEFAULT_LOG_FILE_NAME: &str = "navi.log";

/// ログ出力先の指定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// -v: stderr にも人間向けの 1 行ログを出す
    pub verbose: bool,
    /// --log-file。未指定ならストアと同じディレクトリの navi.log（dry-run では書かない）
    pub log_file: Option<PathBuf>,
}

pub struct App {
    pub pipeline: PipelineUseCase,
    pub log: Arc<dyn Log>,
}

/// JSONL ログの書き先。公開される out_dir には置かない。
fn log_file_path(config: &PipelineConfig, settings: &LogSettings) -> Option<PathBuf> {
    match &settings.log_file {
        Some(path) => Some(path.clone()),
        None if !config.dry_run => Some(config.store_path.with_file_name(DEFAULT_LOG_FILE_NAME)),
        None => None,
    }
}

fn wire_log(fs: &Arc<dyn FileSystem>, config: &PipelineConfig, settings: &LogSettings) -> Arc<dyn Log> {
    let mut sinks: Vec<Arc<dyn Log>> = Vec::new();
    if let Some(path) = log_file_path(config, settings) {
        sinks.push(Arc::new(JsonlLog::new(Arc::clone(fs), path)));
    }
    if settings.verbose {
        sinks.push(Arc::new(StderrLog::new(LogLevel::Debug)));
    }
    Arc::new(TeeLog::new(sinks))
}

fn wire_analyzer(
    fs: &Arc<dyn FileSystem>,
    http: &Arc<dyn HttpClient>,
    analyze: &AnalyzeConfig,
) -> Result<Arc<dyn RecordAnalyzer>, Error> {
    let env = StdEnvResolver;
    let resolved = ProfileCatalog::load(fs.as_ref(), &env)?.resolve(analyze.profile.as_ref())?;
    let provider = create_provider(&resolved, analyze.model.as_ref(), &env, Arc::clone(http))?;
    Ok(Arc::new(LlmRecordAnalyzer::new(provider)))
}

/// 配線: 1 回の実行分の PipelineConfig から App を組み立てる
pub fn wire_navi(config: &PipelineConfig, settings: &LogSettings) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let log = wire_log(&fs, config, settings);
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);

    let analyzer = match &config.analyze {
        Some(analyze) => Some(wire_analyzer(&fs, &http, analyze)?),
        None => None,
    };

    let deps = PipelineDeps {
        source: SourceDeps {
            fetcher: Arc::new(HttpSourceFetcher::new(http, config.source.clone())),
            extractor: Arc::new(ScraperExtractor::new(&config.extract, &config.source.origin)?),
        },
        store: Arc::new(JsonRecordStore::new(Arc::clone(&fs), &config.store_path)),
        analyzer,
        renderer: Arc::new(HtmlSiteRenderer::new(Arc::clone(&fs), config.render.clone())),
        system: SystemDeps {
            clock: Arc::new(StdClock),
            log: Arc::clone(&log),
        },
    };
    Ok(App {
        pipeline: PipelineUseCase::new(deps),
        log,
    })
}
