//! 新しい順に並んだ Record の列と、候補のマージ

use std::collections::HashSet;

use common::error::Error;

use super::record::{normalize_title, Candidate, Record};

/// 既定の保持件数
pub const DEFAULT_RETENTION_CAP: usize = 1000;

/// 保持件数の上限（1 以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionCap(usize);

impl RetentionCap {
    pub fn new(cap: usize) -> Result<Self, Error> {
        if cap == 0 {
            return Err(Error::invalid_argument("--cap must be at least 1"));
        }
        Ok(Self(cap))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for RetentionCap {
    fn default() -> Self {
        Self(DEFAULT_RETENTION_CAP)
    }
}

/// Record の列（先頭が最新）。タイトルは空白の違いを無視して一意。
/// 保存済みタイトル自体は書き換えないので、全角空白を含む古いストアもそのまま残る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    records: Vec<Record>,
}

/// マージの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub store: Store,
    /// 新たに作った Record 数（上限で即座に押し出された分も含む）
    pub added: usize,
    /// 上限で末尾から削った件数
    pub evicted: usize,
}

impl Store {
    /// 読み込んだ Record 列から組み立てる。同じタイトル（`normalize_title` 後）が複数あれば先頭を残す。
    /// 戻り値の 2 つ目は落とした重複の数。
    pub fn from_records(records: Vec<Record>) -> (Self, usize) {
        let before = records.len();
        let mut seen = HashSet::new();
        let records: Vec<Record> = records
            .into_iter()
            .filter(|r| seen.insert(normalize_title(&r.title)))
            .collect();
        let dropped = before - records.len();
        (Self { records }, dropped)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        let key = normalize_title(title);
        self.records.iter().any(|r| normalize_title(&r.title) == key)
    }

    /// 未知タイトルの候補だけ `build` で Record にし、抽出順で先頭に積む。
    /// 既存 Record は元の順で後ろに続き、全体を `cap` 件に切り詰める。
    ///
    /// `build` は未知タイトルにつき 1 回だけ呼ばれる（分析などの高価な処理を既知分で走らせない）。
    /// タイトルは候補のものを使う。
    pub fn merge<I, F>(self, candidates: I, cap: RetentionCap, mut build: F) -> MergeOutcome
    where
        I: IntoIterator<Item = Candidate>,
        F: FnMut(&Candidate) -> Record,
    {
        let mut seen: HashSet<String> = self
            .records
            .iter()
            .map(|r| normalize_title(&r.title))
            .collect();
        let mut merged: Vec<Record> = Vec::new();
        for candidate in candidates {
            if !seen.insert(normalize_title(&candidate.title)) {
                continue;
            }
            let mut record = build(&candidate);
            record.title = candidate.title;
            merged.push(record);
        }
        let added = merged.len();
        merged.extend(self.records);
        let evicted = merged.len().saturating_sub(cap.get());
        merged.truncate(cap.get());
        MergeOutcome {
            store: Store { records: merged },
            added,
            evicted,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
