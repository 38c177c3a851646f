//! システム時計と、テスト用の固定時刻

use crate::ports::outbound::Clock;

#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// 常に同じ時刻を返す（テストで取得日や更新日時を固定する）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    ms: u64,
}

impl FixedClock {
    pub fn new(ms: u64) -> Self {
        Self { ms }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.ms
    }
}
