//! scraper による一覧ページからの候補抽出
//!
//! アンカーを文書順に遅延で流し、記事パスに一致するものだけを正規化して取り出す。

use std::collections::HashSet;

use common::error::Error;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{normalize_title, Candidate, ExtractRules, ParseError};
use crate::ports::outbound::CandidateExtractor;

pub struct ScraperExtractor {
    selector: Selector,
    link_pattern: Regex,
    origin: String,
    min_title_chars: usize,
    max_candidates: usize,
}

impl ScraperExtractor {
    /// セレクタと記事パスの正規表現をコンパイルする。不正なら usage エラー。
    pub fn new(rules: &ExtractRules, origin: &str) -> Result<Self, Error> {
        let selector = Selector::parse(&rules.selector).map_err(|e| {
            Error::invalid_argument(format!("invalid selector '{}': {}", rules.selector, e))
        })?;
        let link_pattern = Regex::new(&rules.link_pattern).map_err(|e| {
            Error::invalid_argument(format!("invalid link pattern '{}': {}", rules.link_pattern, e))
        })?;
        Ok(Self {
            selector,
            link_pattern,
            origin: origin.trim_end_matches('/').to_string(),
            min_title_chars: rules.min_title_chars,
            max_candidates: rules.max_candidates,
        })
    }

    /// (表示テキスト, href) を文書順に返す
    fn anchors<'a>(&'a self, doc: &'a Html) -> impl Iterator<Item = (String, &'a str)> + 'a {
        doc.select(&self.selector).filter_map(|el: ElementRef<'a>| {
            let href = el.value().attr("href")?.trim();
            if !self.link_pattern.is_match(href) {
                return None;
            }
            Some((normalize_title(&el.text().collect::<String>()), href))
        })
    }
}

impl CandidateExtractor for ScraperExtractor {
    fn extract(&self, markup: &str) -> Result<Vec<Candidate>, ParseError> {
        if markup.trim().is_empty() {
            return Err(ParseError::Markup("empty document".to_string()));
        }
        let doc = Html::parse_document(markup);
        let mut seen: HashSet<String> = HashSet::new();
        let candidates = self
            .anchors(&doc)
            .filter(|(title, _)| !title.is_empty() && title.chars().count() >= self.min_title_chars)
            .filter(|(title, _)| seen.insert(title.clone()))
            .map(|(title, href)| Candidate::new(title, absolutize(&self.origin, href)))
            .take(self.max_candidates)
            .collect();
        Ok(candidates)
    }
}

/// http(s) で始まる href はそのまま、それ以外は origin を前置する
pub fn absolutize(origin: &str, href: &str) -> String {
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        return format!("{}://{}", scheme, rest);
    }
    if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        format!("{}/{}", origin, href)
    }
}
