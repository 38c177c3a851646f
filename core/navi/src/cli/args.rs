use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

use crate::domain::config::{
    DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_TITLE_CHARS, DEFAULT_OUT_DIR, DEFAULT_RENDER_LIMIT,
    DEFAULT_SOURCE_URL, DEFAULT_STORE_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::domain::store::DEFAULT_RETENTION_CAP;
use crate::domain::{
    AnalyzeConfig, ExtractRules, PipelineConfig, RenderConfig, RetentionCap, SourceConfig,
    TagVocabulary,
};
use crate::wiring::LogSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --dry-run: 取得とマージだけ行い、ストア・サイトを書かない
    pub dry_run: bool,
    /// --analyze: 新規 Record を LLM で分析する
    pub analyze: bool,
    pub source_url: String,
    pub store: PathBuf,
    pub out_dir: PathBuf,
    pub cap: usize,
    pub render_limit: usize,
    pub max_candidates: usize,
    pub min_title_chars: usize,
    pub timeout_secs: u64,
    pub site_url: Option<String>,
    pub form_url: Option<String>,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: false,
            dry_run: false,
            analyze: false,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            store: PathBuf::from(DEFAULT_STORE_PATH),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            cap: DEFAULT_RETENTION_CAP,
            render_limit: DEFAULT_RENDER_LIMIT,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            min_title_chars: DEFAULT_MIN_TITLE_CHARS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            site_url: None,
            form_url: None,
            profile: None,
            model: None,
            log_file: None,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("navi")
        .about("Collect subsidy announcements into a JSON store and render a static site")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("source-url")
                .long("source-url")
                .value_name("url")
                .help("Listing page to fetch")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("store")
                .long("store")
                .value_name("path")
                .help("JSON store file")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("out-dir")
                .long("out-dir")
                .value_name("dir")
                .help("Directory for index.html and sitemap.xml")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("cap")
                .long("cap")
                .value_name("n")
                .help("Maximum number of records kept in the store")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("render-limit")
                .long("render-limit")
                .value_name("n")
                .help("Number of newest records shown on the page")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("max-candidates")
                .long("max-candidates")
                .value_name("n")
                .help("Maximum candidates taken from one fetch")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("min-title-chars")
                .long("min-title-chars")
                .value_name("n")
                .help("Discard anchors whose text is shorter than this")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout-secs")
                .long("timeout-secs")
                .value_name("secs")
                .help("Timeout for the listing request")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("site-url")
                .long("site-url")
                .value_name("url")
                .help("Public URL of the site (enables sitemap.xml)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("form-url")
                .long("form-url")
                .value_name("url")
                .help("Consultation form linked from every record")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("analyze")
                .long("analyze")
                .help("Summarize new records with an LLM")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM profile for --analyze (gemini, gpt, echo, etc.)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name for --analyze")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Fetch and merge but write nothing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("JSONL log file (default: navi.log next to --store)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let d = Config::default();
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        dry_run: matches.get_flag("dry-run"),
        analyze: matches.get_flag("analyze"),
        source_url: matches
            .get_one::<String>("source-url")
            .cloned()
            .unwrap_or(d.source_url),
        store: matches.get_one::<PathBuf>("store").cloned().unwrap_or(d.store),
        out_dir: matches
            .get_one::<PathBuf>("out-dir")
            .cloned()
            .unwrap_or(d.out_dir),
        cap: matches.get_one::<usize>("cap").copied().unwrap_or(d.cap),
        render_limit: matches
            .get_one::<usize>("render-limit")
            .copied()
            .unwrap_or(d.render_limit),
        max_candidates: matches
            .get_one::<usize>("max-candidates")
            .copied()
            .unwrap_or(d.max_candidates),
        min_title_chars: matches
            .get_one::<usize>("min-title-chars")
            .copied()
            .unwrap_or(d.min_title_chars),
        timeout_secs: matches
            .get_one::<u64>("timeout-secs")
            .copied()
            .unwrap_or(d.timeout_secs),
        site_url: matches.get_one::<String>("site-url").cloned(),
        form_url: matches.get_one::<String>("form-url").cloned(),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

/// 引数列から解析する（先頭はプログラム名）
pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "navi", &mut std::io::stdout());
}

/// clap が組み立てたヘルプを標準出力に出す
pub fn print_help() {
    let _ = build_clap_command().print_help();
    println!();
}

fn validate_url(flag: &str, value: &str) -> Result<String, Error> {
    url::Url::parse(value)
        .map_err(|e| Error::invalid_argument(format!("invalid {} '{}': {}", flag, value, e)))?;
    Ok(value.to_string())
}

impl Config {
    /// 1 回の実行分の PipelineConfig に変換する（値の検証もここで行う）
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, Error> {
        let source = SourceConfig::new(&self.source_url, Duration::from_secs(self.timeout_secs))?;
        let site_url = match &self.site_url {
            Some(u) => Some(validate_url("--site-url", u)?),
            None => None,
        };
        let form_url = match &self.form_url {
            Some(u) => Some(validate_url("--form-url", u)?),
            None => None,
        };
        if (self.profile.is_some() || self.model.is_some()) && !self.analyze {
            return Err(Error::invalid_argument(
                "-p/--profile and -m/--model require --analyze",
            ));
        }
        let analyze = self.analyze.then(|| AnalyzeConfig {
            profile: self.profile.clone(),
            model: self.model.clone(),
        });
        Ok(PipelineConfig {
            source,
            extract: ExtractRules {
                min_title_chars: self.min_title_chars,
                max_candidates: self.max_candidates,
                ..ExtractRules::default()
            },
            store_path: self.store.clone(),
            retention_cap: RetentionCap::new(self.cap)?,
            render: RenderConfig {
                out_dir: self.out_dir.clone(),
                render_limit: self.render_limit,
                site_url,
                form_url,
            },
            analyze,
            dry_run: self.dry_run,
            vocabulary: TagVocabulary::default(),
        })
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            verbose: self.verbose,
            log_file: self.log_file.clone(),
        }
    }
}
