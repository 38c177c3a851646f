//! タグ分類（キーワード → 表示色の静的な対応表）

/// 表に無いタグを描画するときの色
pub const NEUTRAL_TAG_COLOR: &str = "#6c757d";

/// 既定の語彙（宣言順がタグの並び順になる）
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("IT導入", "#007bff"),
    ("DX", "#6f42c1"),
    ("創業", "#fd7e14"),
    ("設備投資", "#20c997"),
    ("省エネ", "#28a745"),
    ("雇用", "#e83e8c"),
    ("販路開拓", "#17a2b8"),
    ("事業承継", "#6c757d"),
    ("補助金", "#dc3545"),
    ("助成金", "#ffc107"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub keyword: String,
    pub color: String,
}

/// キーワード → 色の対応表。タイトルの部分一致でタグを付ける。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    rules: Vec<TagRule>,
}

impl TagVocabulary {
    pub fn new(rules: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(keyword, color)| TagRule { keyword, color })
                .collect(),
        }
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// タイトルに部分文字列として含まれるキーワードを宣言順で返す。
    /// 同じキーワードが 2 回現れても 1 つだけ。
    pub fn classify(&self, title: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for rule in &self.rules {
            if title.contains(rule.keyword.as_str()) && !tags.contains(&rule.keyword) {
                tags.push(rule.keyword.clone());
            }
        }
        tags
    }

    pub fn color_of(&self, tag: &str) -> &str {
        self.rules
            .iter()
            .find(|r| r.keyword == tag)
            .map(|r| r.color.as_str())
            .unwrap_or(NEUTRAL_TAG_COLOR)
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(k, c)| (k.to_string(), c.to_string())),
        )
    }
}
