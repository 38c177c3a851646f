//! Outbound ポート: アプリが外界（FS・時刻・環境変数・HTTP・ログ）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod http_client;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use http_client::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{Log, LogLevel, LogRecord};
