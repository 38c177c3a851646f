//! -v 用の人間向けログ（1 レコードを stderr へ 1 行）

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

/// fields を連結した部分の上限（文字数）
const FIELDS_MAX_CHARS: usize = 200;

pub fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}]", record.level);
    if let Some(kind) = record.kind {
        line += &format!(" {}:", kind);
    }
    line += " ";
    line += &record.message;

    let fields: Vec<String> = record.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    if !fields.is_empty() {
        let joined = fields.join(" ");
        line += "  ";
        if joined.chars().count() > FIELDS_MAX_CHARS {
            line.extend(joined.chars().take(FIELDS_MAX_CHARS));
            line += "...";
        } else {
            line += &joined;
        }
    }
    line
}

/// `max_level` より詳細なレコードは出さない
pub struct StderrLog {
    max_level: LogLevel,
}

impl StderrLog {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level <= self.max_level {
            eprintln!("{}", format_line(record));
        }
        Ok(())
    }
}
