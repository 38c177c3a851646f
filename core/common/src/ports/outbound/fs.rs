//! ファイルシステム Outbound ポート

use crate::error::Error;
use std::path::{Path, PathBuf};

/// 実装は `common::adapter::StdFileSystem`。エラーメッセージにはパスを含める。
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    /// 末尾へ追記（無ければ作成）
    fn append(&self, path: &Path, contents: &str) -> Result<(), Error>;
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;

    /// 隣の一時ファイルに書いてから rename で差し替える。
    /// 失敗しても既存ファイルは元の内容のまま残る。
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), Error> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.create_dir_all(dir)?;
        }
        let tmp = tmp_path_for(path);
        let result = self
            .write(&tmp, contents)
            .and_then(|()| self.rename(&tmp, path));
        if result.is_err() {
            let _ = self.remove_file(&tmp);
        }
        result
    }
}

/// `subsidies.json` → `subsidies.json.tmp`
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
