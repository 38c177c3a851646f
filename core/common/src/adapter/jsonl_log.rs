//! ログの出力先: JSONL ファイル、複数出力先への複製、テスト用のメモリ

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogRecord};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 1 レコード 1 行でファイルへ追記する。親ディレクトリは書き込み時に作る。
pub struct JsonlLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonlLog {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self { fs, path: path.into() }
    }
}

impl Log for JsonlLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.fs.create_dir_all(dir)?;
        }
        self.fs.append(&self.path, &record.to_json_line()?)
    }
}

/// 全出力先に書く。失敗があっても残りには書き、最初のエラーを返す。
pub struct TeeLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.sinks
            .iter()
            .map(|sink| sink.log(record))
            .fold(Ok(()), |acc, r| acc.and(r))
    }
}

#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Log for MemoryLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::system("log buffer poisoned"))?;
        records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::ports::outbound::LogLevel;

    struct Broken;

    impl Log for Broken {
        fn log(&self, _record: &LogRecord) -> Result<(), Error> {
            Err(Error::io_msg("disk full"))
        }
    }

    #[test]
    fn test_jsonl_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/navi.log");
        let log = JsonlLog::new(Arc::new(StdFileSystem), &path);

        log.log(&LogRecord::new(LogLevel::Info, "first")).unwrap();
        log.log(&LogRecord::new(LogLevel::Warn, "second").kind("fetch")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "warn");
        assert_eq!(second["kind"], "fetch");
    }

    #[test]
    fn test_tee_keeps_writing_after_failure() {
        let mem = Arc::new(MemoryLog::new());
        let sinks: Vec<Arc<dyn Log>> = vec![Arc::new(Broken), mem.clone()];
        let tee = TeeLog::new(sinks);
        let err = tee.log(&LogRecord::new(LogLevel::Debug, "x")).unwrap_err();
        assert_eq!(err, Error::io_msg("disk full"));
        assert_eq!(mem.records()[0].message, "x");
    }
}
