//! profiles.json（名前付きプロバイダ設定）の読み込みと解決
//!
//! ```json
//! {
//!   "default_provider": "local",
//!   "providers": {
//!     "local": { "type": "ollama", "base_url": "http://localhost:11434/v1", "model": "llama3.1" }
//!   }
//! }
//! ```
//!
//! -p で指定した名前（無ければ default_provider、それも無ければ gemini）を
//! profiles.json、組み込み名の順に探す。

use crate::domain::ProviderName;
use crate::error::Error;
use crate::ports::outbound::{EnvResolver, FileSystem};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "gemini";

/// API 形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    /// OpenAI 本家（API キー必須）
    #[serde(alias = "gpt")]
    Openai,
    /// Chat Completions 互換サーバ（API キー任意）
    #[serde(rename = "openai_compat", alias = "ollama")]
    OpenaiCompat,
    /// 通信しない
    Echo,
}

impl ProviderKind {
    const BUILTINS: [(&'static str, ProviderKind); 5] = [
        ("echo", ProviderKind::Echo),
        ("gemini", ProviderKind::Gemini),
        ("gpt", ProviderKind::Openai),
        ("openai", ProviderKind::Openai),
        ("openai_compat", ProviderKind::OpenaiCompat),
    ];

    /// 組み込みプロファイル名（大文字小文字は区別しない）
    pub fn builtin(name: &str) -> Option<Self> {
        Self::BUILTINS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
    }
}

/// 1 プロファイル分の設定。省略した項目は各プロバイダの既定値
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderProfile {
    #[serde(rename = "type", alias = "provider")]
    pub kind: ProviderKind,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, alias = "default_model")]
    pub model: Option<String>,
    /// API キーを読む環境変数名
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl ProviderProfile {
    fn builtin(kind: ProviderKind) -> Self {
        Self {
            kind,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
        }
    }
}

/// 解決済みのプロファイル（名前はログとエラー表示用）
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub name: String,
    pub profile: ProviderProfile,
}

/// profiles.json の内容
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileCatalog {
    #[serde(default, alias = "default")]
    pub default_provider: Option<String>,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderProfile>,
}

impl ProfileCatalog {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 設定ディレクトリの profiles.json を読む。無ければ空のカタログ、壊れていればパス付きの Error::Json
    pub fn load(fs: &dyn FileSystem, env: &dyn EnvResolver) -> Result<Self, Error> {
        let path = env.resolve_home_dir()?.profiles_file();
        if !fs.exists(&path) {
            return Ok(Self::default());
        }
        let text = fs.read_to_string(&path)?;
        Self::parse(&text).map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
    }

    /// 不明な名前は利用可能な名前の一覧付きの usage エラー
    pub fn resolve(&self, requested: Option<&ProviderName>) -> Result<ResolvedProfile, Error> {
        let name = match requested {
            Some(n) => n.as_str(),
            None => self.default_provider.as_deref().unwrap_or(DEFAULT_PROFILE),
        };
        let profile = match self.providers.get(name) {
            Some(p) => p.clone(),
            None => match ProviderKind::builtin(name) {
                Some(kind) => ProviderProfile::builtin(kind),
                None => {
                    return Err(Error::invalid_argument(format!(
                        "Unknown provider: '{}'. Available: {}",
                        name,
                        self.available().join(", ")
                    )))
                }
            },
        };
        Ok(ResolvedProfile {
            name: name.to_string(),
            profile,
        })
    }

    fn available(&self) -> Vec<&str> {
        let mut names: Vec<&str> = ProviderKind::BUILTINS.iter().map(|(n, _)| *n).collect();
        names.extend(self.providers.keys().map(String::as_str));
        names.sort_unstable();
        names.dedup();
        names
    }
}
