//! FileSystem ポート上の JSON 配列ストア（2 スペース整形、tmp + rename で上書き）

use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::ports::outbound::FileSystem;

use crate::domain::{ParseError, PersistenceError, Record};
use crate::ports::outbound::RecordStore;

pub struct JsonRecordStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }

    fn parse_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Store {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&self) -> Result<Option<Vec<Record>>, ParseError> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| self.parse_error(e.to_string()))?;
        serde_json::from_str::<Vec<Record>>(&contents)
            .map(Some)
            .map_err(|e| self.parse_error(e.to_string()))
    }

    fn save(&self, records: &[Record]) -> Result<(), PersistenceError> {
        let persistence_error = |message: String| PersistenceError {
            path: self.path.clone(),
            message,
        };
        let mut json = serde_json::to_string_pretty(records)
            .map_err(|e| persistence_error(e.to_string()))?;
        json.push('\n');
        self.fs
            .write_atomic(&self.path, &json)
            .map_err(|e| persistence_error(e.to_string()))
    }
}
