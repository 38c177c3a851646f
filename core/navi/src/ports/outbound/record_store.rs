use crate::domain::{ParseError, PersistenceError, Record};

/// Record 列の永続化
pub trait RecordStore: Send + Sync {
    /// ファイルが無ければ Ok(None)。壊れていれば ParseError（呼び出し側で空として扱う）
    fn load(&self) -> Result<Option<Vec<Record>>, ParseError>;

    /// 全体を原子的に上書きする
    fn save(&self, records: &[Record]) -> Result<(), PersistenceError>;
}
