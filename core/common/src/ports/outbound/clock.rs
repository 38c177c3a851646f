//! 時刻 Outbound ポート
//!
//! usecase はこの trait 経由で「現在時刻」を取得し、取得日の刻印や更新日時の表示に使う。

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の `FixedClock`。
pub trait Clock: Send + Sync {
    /// 現在時刻をミリ秒（Unix epoch）で返す
    fn now_ms(&self) -> u64;
}
