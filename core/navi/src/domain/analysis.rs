//! LLM 分析結果（要約・対象・金額）の型と、応答テキストからの検証付きパース
//!
//! 応答は信用しない。フィールドごとに検証し、欠けていれば既定文言に倒す。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SUMMARY: &str = "詳細は公式サイトをご確認ください";
pub const DEFAULT_TARGET: &str = "中小企業・個人事業主";
pub const DEFAULT_AMOUNT: &str = "公式サイト参照";

/// 1 フィールドの最大文字数（超えた分は切り捨て）
const MAX_FIELD_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub target: String,
    pub amount: String,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY.to_string(),
            target: DEFAULT_TARGET.to_string(),
            amount: DEFAULT_AMOUNT.to_string(),
        }
    }
}

/// パース結果。`defaulted` は既定値に倒したフィールド名（ログ用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnalysis {
    pub analysis: Analysis,
    pub defaulted: Vec<&'static str>,
}

impl Analysis {
    /// LLM の応答テキストをパースする。失敗しない。
    ///
    /// コードフェンスや前置きの文章があっても、最初の `{` から最後の `}` までを JSON として読む。
    pub fn parse_llm_text(text: &str) -> ParsedAnalysis {
        let object = extract_json_object(text)
            .and_then(|s| serde_json::from_str::<Value>(s).ok())
            .and_then(|v| match v {
                Value::Object(m) => Some(m),
                _ => None,
            })
            .unwrap_or_default();

        let mut defaulted = Vec::new();
        let mut pick = |key: &'static str, default: &str| match string_field(&object, key) {
            Some(v) => v,
            None => {
                defaulted.push(key);
                default.to_string()
            }
        };
        let analysis = Analysis {
            summary: pick("summary", DEFAULT_SUMMARY),
            target: pick("target", DEFAULT_TARGET),
            amount: pick("amount", DEFAULT_AMOUNT),
        };
        ParsedAnalysis {
            analysis,
            defaulted,
        }
    }
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    let s = object.get(key)?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    Some(s.chars().take(MAX_FIELD_CHARS).collect())
}
