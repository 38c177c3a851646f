//! 取得 → 抽出 → タグ付け → マージ → 保存 → 描画 の 1 回分
//!
//! 取得・抽出・ストア読み込みの失敗は警告ログを出して空の値で続行する。
//! 致命的なのはストアの書き込みと描画の失敗だけ。

use std::path::PathBuf;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};

use crate::domain::jst;
use crate::domain::{Analysis, Candidate, PipelineConfig, Record, Store};
use crate::ports::inbound::RunPipeline;
use crate::ports::outbound::{
    CandidateExtractor, RecordAnalyzer, RecordStore, SiteRenderer, SiteView, SourceFetcher,
};

// --- 責務別 Deps（wiring は組み立てるだけ）

pub struct PipelineDeps {
    pub source: SourceDeps,
    pub store: Arc<dyn RecordStore>,
    /// None なら分析しない
    pub analyzer: Option<Arc<dyn RecordAnalyzer>>,
    pub renderer: Arc<dyn SiteRenderer>,
    pub system: SystemDeps,
}

pub struct SourceDeps {
    pub fetcher: Arc<dyn SourceFetcher>,
    pub extractor: Arc<dyn CandidateExtractor>,
}

pub struct SystemDeps {
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

/// 1 回の実行結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub added: usize,
    pub total: usize,
    pub evicted: usize,
    /// 取得・抽出に失敗して候補 0 件で続行した
    pub fetch_failed: bool,
    /// 壊れたストアを空として読み直した
    pub store_recovered: bool,
    pub store_written: bool,
    pub rendered: Vec<PathBuf>,
}

impl RunReport {
    /// 標準出力に出す 1 行
    pub fn summary_line(&self) -> String {
        format!(
            "added {} new record(s), store has {} record(s)",
            self.added, self.total
        )
    }
}

/// ストア読み込みの結果
struct LoadedStore {
    store: Store,
    /// 書き戻しが要る（ファイルが無い・壊れていた・重複を落とした）
    dirty: bool,
    recovered: bool,
}

pub struct PipelineUseCase {
    deps: PipelineDeps,
}

impl PipelineUseCase {
    pub fn new(deps: PipelineDeps) -> Self {
        Self { deps }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.system.log.log(&record.layer("usecase"));
    }

    fn load_store(&self) -> LoadedStore {
        match self.deps.store.load() {
            Ok(Some(records)) => {
                let (store, dropped) = Store::from_records(records);
                if dropped > 0 {
                    self.log(
                        LogRecord::new(LogLevel::Warn, "duplicate titles dropped from store")
                            .kind("store")
                            .field("dropped", dropped),
                    );
                }
                LoadedStore {
                    store,
                    dirty: dropped > 0,
                    recovered: false,
                }
            }
            Ok(None) => LoadedStore {
                store: Store::default(),
                dirty: true,
                recovered: false,
            },
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "store unreadable, starting empty")
                        .kind("parse")
                        .field("error", e.to_string()),
                );
                LoadedStore {
                    store: Store::default(),
                    dirty: true,
                    recovered: true,
                }
            }
        }
    }

    /// 取得と抽出。どちらかが失敗したら候補 0 件（Err にはしない）
    fn collect_candidates(&self) -> (Vec<Candidate>, bool) {
        let page = match self.deps.source.fetcher.fetch() {
            Ok(page) => page,
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "fetch failed, no new records this run")
                        .kind("fetch")
                        .field("reason", e.kind())
                        .field("error", e.to_string()),
                );
                return (Vec::new(), true);
            }
        };
        if page.lossy {
            self.log(
                LogRecord::new(LogLevel::Warn, "response body was not valid UTF-8, decoded lossily")
                    .kind("fetch"),
            );
        }
        match self.deps.source.extractor.extract(&page.markup) {
            Ok(candidates) => {
                self.log(
                    LogRecord::new(LogLevel::Info, "candidates extracted")
                        .kind("extract")
                        .field("count", candidates.len()),
                );
                (candidates, false)
            }
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "markup unusable, no new records this run")
                        .kind("parse")
                        .field("error", e.to_string()),
                );
                (Vec::new(), true)
            }
        }
    }

    fn analyze(&self, analyzer: &dyn RecordAnalyzer, candidate: &Candidate, tags: &[String]) -> Analysis {
        match analyzer.analyze(candidate, tags) {
            Ok(parsed) => {
                if !parsed.defaulted.is_empty() {
                    self.log(
                        LogRecord::new(LogLevel::Debug, "analysis fields defaulted")
                            .kind("analyze")
                            .field("title", candidate.title.as_str())
                            .field("fields", parsed.defaulted.join(",")),
                    );
                }
                parsed.analysis
            }
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Warn, "analysis failed, using defaults")
                        .kind("analyze")
                        .field("title", candidate.title.as_str())
                        .field("error", e.to_string()),
                );
                Analysis::default()
            }
        }
    }
}

impl RunPipeline for PipelineUseCase {
    fn run(&self, config: &PipelineConfig) -> Result<RunReport, Error> {
        let now_ms = self.deps.system.clock.now_ms();
        let today = jst::capture_date(now_ms);

        let loaded = self.load_store();
        let (candidates, fetch_failed) = self.collect_candidates();

        let analyzer = self.deps.analyzer.as_deref();
        let outcome = loaded
            .store
            .merge(candidates, config.retention_cap, |candidate| {
                let tags = config.vocabulary.classify(&candidate.title);
                let analysis = analyzer.map(|a| self.analyze(a, candidate, &tags));
                Record::capture(candidate.clone(), &today, tags, analysis)
            });

        let mut report = RunReport {
            added: outcome.added,
            total: outcome.store.len(),
            evicted: outcome.evicted,
            fetch_failed,
            store_recovered: loaded.recovered,
            ..RunReport::default()
        };
        if outcome.evicted > 0 {
            self.log(
                LogRecord::new(LogLevel::Info, "oldest records evicted")
                    .kind("store")
                    .field("evicted", outcome.evicted),
            );
        }

        if config.dry_run {
            self.log(LogRecord::new(LogLevel::Info, "dry run, nothing written").kind("store"));
            return Ok(report);
        }

        let changed = outcome.added > 0 || outcome.evicted > 0 || loaded.dirty;
        if changed {
            self.deps.store.save(outcome.store.records())?;
            report.store_written = true;
        }

        report.rendered = self.deps.renderer.render(&SiteView {
            records: outcome.store.records(),
            vocabulary: &config.vocabulary,
            now_ms,
        })?;
        Ok(report)
    }
}
