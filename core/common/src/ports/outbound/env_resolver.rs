//! 環境変数解決 Outbound ポート
//!
//! 設定ディレクトリと API キーを環境変数から解決する。
//! LLM 層はこの trait 経由でのみ環境変数を読む。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` とテスト用の `FixedEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// 設定ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. NAVI_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/navi（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/navi
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// 空文字列でない値を持つ環境変数
    fn var(&self, name: &str) -> Option<String>;

    /// 必須の環境変数（API キー等）。無ければ Error::Env
    fn require(&self, name: &str) -> Result<String, Error> {
        self.var(name)
            .ok_or_else(|| Error::env(format!("{} environment variable is not set", name)))
    }
}
