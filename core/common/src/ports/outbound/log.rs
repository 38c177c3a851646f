//! 構造化ログ Outbound ポート
//!
//! 1 レコードが JSONL の 1 行になる。stdout に出す実行結果の要約とは別チャネル。

use crate::error::Error;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// 重大な順。`Ord` はこの並び（Error < Debug）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// RFC3339 (UTC)
    pub ts: String,
    pub level: LogLevel,
    pub message: String,
    /// cli / usecase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<&'static str>,
    /// lifecycle / fetch / parse / extract / store / analyze / render / error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            level,
            message: message.into(),
            layer: None,
            kind: None,
            fields: Map::new(),
        }
    }

    pub fn layer(self, layer: &'static str) -> Self {
        Self {
            layer: Some(layer),
            ..self
        }
    }

    pub fn kind(self, kind: &'static str) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn to_json_line(&self) -> Result<String, Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// 実装は `common::adapter` の JsonlLog / StderrLog / TeeLog / MemoryLog
pub trait Log: Send + Sync {
    fn log(&self, record: &LogRecord) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_shape() {
        let mut rec = LogRecord::new(LogLevel::Info, "run started")
            .layer("cli")
            .kind("lifecycle")
            .field("source", "https://example.jp/list");
        rec.ts = "2026-10-19T01:00:00+00:00".to_string();
        assert_eq!(
            rec.to_json_line().unwrap(),
            "{\"ts\":\"2026-10-19T01:00:00+00:00\",\"level\":\"info\",\"message\":\"run started\",\
             \"layer\":\"cli\",\"kind\":\"lifecycle\",\"fields\":{\"source\":\"https://example.jp/list\"}}\n"
        );
    }

    #[test]
    fn test_unset_keys_are_omitted() {
        let line = LogRecord::new(LogLevel::Warn, "fetch failed").to_json_line().unwrap();
        assert!(line.contains("\"level\":\"warn\""));
        assert!(!line.contains("\"layer\""));
        assert!(!line.contains("\"fields\""));
    }

    #[test]
    fn test_level_order() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
