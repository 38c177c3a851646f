//! コマンドライン解析（clap builder）

pub mod args;

pub use args::{parse_args, print_completion, print_help, ParseOutcome};
