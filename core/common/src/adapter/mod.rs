//! アダプター（外界の I/O を trait 実装として提供）
//!
//! usecase はポートの trait 経由でのみファイル・時刻・HTTP・ログに触れる。
//! 実装は標準実装（Std*）やテスト用の固定値実装を注入する。

pub mod jsonl_log;
pub mod reqwest_http_client;
pub mod stderr_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use jsonl_log::{JsonlLog, MemoryLog, TeeLog};
pub use reqwest_http_client::ReqwestHttpClient;
pub use stderr_log::StderrLog;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::{FixedEnvResolver, StdEnvResolver};
pub use std_fs::StdFileSystem;
