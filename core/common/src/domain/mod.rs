//! ドメイン型（Newtype）
//!
//! 設定ディレクトリやプロファイル名を素の String / PathBuf のまま運ばない。

use std::fmt;
use std::path::{Path, PathBuf};

/// 設定ディレクトリ（profiles.json の置き場所）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn profiles_file(&self) -> PathBuf {
        self.0.join("profiles.json")
    }
}

macro_rules! name_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_type! {
    /// -p/--profile で選ぶプロファイル名（profiles.json のキーまたは組み込み名）
    ProviderName
}

name_type! {
    /// -m/--model で上書きするモデル名
    ModelName
}
