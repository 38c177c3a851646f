//! 永続化の単位となる Record と、その元になる Candidate

use serde::{Deserialize, Serialize};

use super::analysis::Analysis;

/// 一覧ページから抽出した候補（タイトルと絶対 URL）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub link: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// 連続する空白（全角空白・改行を含む）を 1 つにまとめて前後を落とす。
/// 抽出時のタイトル整形と、ストア内の重複判定キーの両方に使う。
pub fn normalize_title(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 補助金・助成金のお知らせ 1 件
///
/// `normalize_title(title)` が重複排除のキー。作成後は不変で、同じタイトルを別リンクで再観測しても更新しない。
/// `analysis` は後から加わったキーのため、無いストアも読める（None）し、None のときは書き出さない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub link: String,
    /// 取得日（JST, YYYY-MM-DD）
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

impl Record {
    /// 候補から Record を作る（取得日・タグ・分析結果を付与）
    pub fn capture(
        candidate: Candidate,
        date: &str,
        tags: Vec<String>,
        analysis: Option<Analysis>,
    ) -> Self {
        Self {
            title: candidate.title,
            link: candidate.link,
            date: date.to_string(),
            tags,
            analysis,
        }
    }
}
