//! std::fs による FileSystem

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

fn io_error<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> Error + 'a {
    move |e| Error::io_msg(format!("Failed to {} '{}': {}", action, path.display(), e))
}

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(io_error("read", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(io_error("write", path))
    }

    fn append(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut f| f.write_all(contents.as_bytes()))
            .map_err(io_error("append to", path))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::rename(from, to)
            .map_err(|e| Error::io_msg(format!("Failed to replace '{}': {}", to.display(), e)))
    }

    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        std::fs::remove_file(path).map_err(io_error("remove", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(io_error("create directory", path))
    }
}
