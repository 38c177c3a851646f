//! 日本標準時（UTC+9）での日付・時刻表記

use chrono::{DateTime, FixedOffset, Offset, Utc};

const JST_OFFSET_SECS: i32 = 9 * 3600;

fn to_jst(now_ms: u64) -> DateTime<FixedOffset> {
    let utc = DateTime::<Utc>::from_timestamp_millis(now_ms as i64).unwrap_or_default();
    // 9 時間は常に有効なオフセット
    let offset = FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    utc.with_timezone(&offset)
}

/// Record に付ける取得日（YYYY-MM-DD）
pub fn capture_date(now_ms: u64) -> String {
    to_jst(now_ms).format("%Y-%m-%d").to_string()
}

/// ページの最終更新表記（YYYY年MM月DD日 HH:MM）
pub fn updated_label(now_ms: u64) -> String {
    to_jst(now_ms).format("%Y年%m月%d日 %H:%M").to_string()
}
