//! ユースケース単位のテスト（固定時刻・固定レスポンス・一時ディレクトリ）

mod pipeline_tests;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::adapter::{FixedClock, MemoryLog, StdFileSystem};
use common::error::Error;
use common::ports::outbound::{FileSystem, HttpClient, HttpRequest, HttpResponse, LogLevel};

use crate::adapter::{HtmlSiteRenderer, HttpSourceFetcher, JsonRecordStore, ScraperExtractor};
use crate::domain::{Analysis, Candidate, ParsedAnalysis, PipelineConfig, Record, RetentionCap, SourceConfig};
use crate::ports::inbound::RunPipeline;
use crate::ports::outbound::RecordAnalyzer;
use crate::usecase::pipeline::{PipelineDeps, PipelineUseCase, RunReport, SourceDeps, SystemDeps};

/// 2026-10-19 10:00 JST
pub(crate) const NOW_MS: u64 = 1_792_371_600_000;
pub(crate) const TODAY: &str = "2026-10-19";
pub(crate) const ORIGIN: &str = "https://j-net21.smrj.go.jp";

/// 毎回同じ結果を返す HttpClient。呼ばれた回数を数える。
pub(crate) struct CannedHttp {
    result: Result<HttpResponse, Error>,
    calls: Mutex<usize>,
}

impl CannedHttp {
    pub(crate) fn ok(body: &str) -> Self {
        Self::with(Ok(HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }))
    }

    pub(crate) fn with(result: Result<HttpResponse, Error>) -> Self {
        Self {
            result,
            calls: Mutex::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or(0)
    }
}

impl HttpClient for CannedHttp {
    fn send(&self, _req: &HttpRequest) -> Result<HttpResponse, Error> {
        if let Ok(mut c) = self.calls.lock() {
            *c += 1;
        }
        self.result.clone()
    }
}

/// 決まった応答テキスト（または失敗）を返す分析器
pub(crate) struct StubAnalyzer {
    reply: Result<String, Error>,
    calls: Mutex<Vec<String>>,
}

impl StubAnalyzer {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: Error) -> Self {
        Self {
            reply: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn analyzed_titles(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl RecordAnalyzer for StubAnalyzer {
    fn analyze(&self, candidate: &Candidate, _tags: &[String]) -> Result<ParsedAnalysis, Error> {
        if let Ok(mut c) = self.calls.lock() {
            c.push(candidate.title.clone());
        }
        self.reply.clone().map(|text| Analysis::parse_llm_text(&text))
    }
}

/// 一覧ページ風のマークアップ
pub(crate) fn listing(items: &[(&str, &str)]) -> String {
    let anchors: String = items
        .iter()
        .map(|(title, href)| format!("<li><h3><a href=\"{}\">{}</a></h3></li>\n", href, title))
        .collect();
    format!(
        "<html><body><nav><a href=\"/\">トップページへ戻る</a></nav><ul>\n{}</ul></body></html>",
        anchors
    )
}

pub(crate) fn record(title: &str, link: &str, date: &str) -> Record {
    Record::capture(Candidate::new(title, link), date, vec![], None)
}

/// 一時ディレクトリ上にストアと出力先を置いたテスト用の実行環境
pub(crate) struct Harness {
    pub dir: tempfile::TempDir,
    pub config: PipelineConfig,
    pub log: Arc<MemoryLog>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::with_defaults().unwrap();
        config.source = SourceConfig::new(
            "https://j-net21.smrj.go.jp/snavi/articles",
            Duration::from_secs(5),
        )
        .unwrap();
        config.store_path = dir.path().join("subsidies_db.json");
        config.render.out_dir = dir.path().join("public");
        Self {
            dir,
            config,
            log: Arc::new(MemoryLog::new()),
        }
    }

    pub(crate) fn with_cap(mut self, cap: usize) -> Self {
        self.config.retention_cap = RetentionCap::new(cap).unwrap();
        self
    }

    pub(crate) fn store_path(&self) -> PathBuf {
        self.config.store_path.clone()
    }

    pub(crate) fn index_path(&self) -> PathBuf {
        self.config.render.out_dir.join("index.html")
    }

    pub(crate) fn seed(&self, records: &[Record]) {
        let json = serde_json::to_string_pretty(records).unwrap();
        std::fs::write(self.store_path(), json).unwrap();
    }

    pub(crate) fn stored(&self) -> Vec<Record> {
        let text = std::fs::read_to_string(self.store_path()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    pub(crate) fn pipeline(
        &self,
        http: Arc<dyn HttpClient>,
        analyzer: Option<Arc<dyn RecordAnalyzer>>,
    ) -> PipelineUseCase {
        let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
        PipelineUseCase::new(PipelineDeps {
            source: SourceDeps {
                fetcher: Arc::new(HttpSourceFetcher::new(http, self.config.source.clone())),
                extractor: Arc::new(
                    ScraperExtractor::new(&self.config.extract, &self.config.source.origin).unwrap(),
                ),
            },
            store: Arc::new(JsonRecordStore::new(Arc::clone(&fs), &self.config.store_path)),
            analyzer,
            renderer: Arc::new(HtmlSiteRenderer::new(fs, self.config.render.clone())),
            system: SystemDeps {
                clock: Arc::new(FixedClock::new(NOW_MS)),
                log: self.log.clone(),
            },
        })
    }

    pub(crate) fn run(&self, http: CannedHttp) -> Result<RunReport, Error> {
        self.pipeline(Arc::new(http), None).run(&self.config)
    }

    pub(crate) fn warnings(&self) -> Vec<String> {
        self.log
            .records()
            .into_iter()
            .filter(|r| r.level == LogLevel::Warn)
            .map(|r| r.kind.unwrap_or_default().to_string())
            .collect()
    }
}
