mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::{parse_args, print_completion, print_help, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::PipelineConfig;
use ports::inbound::RunPipeline;
use wiring::{wire_navi, App};

/// パイプラインを 1 回実行し、開始・終了を lifecycle ログに残す Runner
struct Runner {
    app: App,
}

impl Runner {
    fn run(&self, pipeline_config: &PipelineConfig) -> Result<i32, Error> {
        let _ = self.app.log.log(
            &LogRecord::new(LogLevel::Info, "run started")
                .layer("cli")
                .kind("lifecycle")
                .field("source_url", pipeline_config.source.url.as_str())
                .field("dry_run", pipeline_config.dry_run),
        );

        let result = self.app.pipeline.run(pipeline_config);

        match &result {
            Ok(report) => {
                println!("{}", report.summary_line());
                let _ = self.app.log.log(
                    &LogRecord::new(LogLevel::Info, "run finished")
                        .layer("cli")
                        .kind("lifecycle")
                        .field("added", report.added)
                        .field("total", report.total)
                        .field("fetch_failed", report.fetch_failed)
                        .field("store_written", report.store_written)
                        .field("exit_code", 0),
                );
            }
            Err(e) => {
                let _ = self.app.log.log(
                    &LogRecord::new(LogLevel::Error, e.to_string())
                        .layer("cli")
                        .kind("error"),
                );
                let _ = self.app.log.log(
                    &LogRecord::new(LogLevel::Info, "run finished")
                        .layer("cli")
                        .kind("lifecycle")
                        .field("exit_code", e.exit_code()),
                );
            }
        }
        result.map(|_| 0)
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("navi: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        print_help();
        return Ok(0);
    }
    let pipeline_config = config.to_pipeline_config()?;
    let app = wire_navi(&pipeline_config, &config.log_settings())?;
    let runner = Runner { app };
    runner.run(&pipeline_config)
}

fn print_usage() {
    eprintln!("Usage: navi [options]  (navi --help for details)");
}
