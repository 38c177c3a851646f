use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::HttpResponse;

use crate::ports::inbound::RunPipeline;

use super::{listing, record, CannedHttp, Harness, ORIGIN, TODAY};

#[test]
fn test_new_record_goes_before_existing() {
    let mut h = Harness::new();
    h.config.extract.min_title_chars = 1;
    h.config.extract.link_pattern = r"/x/\d+".to_string();
    h.seed(&[record("A", "u1", "2024-01-01")]);

    let page = listing(&[("A", "/x/1"), ("B", "/x/2")]);
    let report = h.run(CannedHttp::ok(&page)).unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.total, 2);
    assert_eq!(report.summary_line(), "added 1 new record(s), store has 2 record(s)");
    let stored = h.stored();
    assert_eq!(stored[0].title, "B");
    assert_eq!(stored[0].link, format!("{}/x/2", ORIGIN));
    assert_eq!(stored[0].date, TODAY);
    assert!(stored[0].tags.is_empty());
    assert_eq!(stored[1], record("A", "u1", "2024-01-01"));
}

#[test]
fn test_second_identical_run_adds_nothing_and_keeps_bytes() {
    let h = Harness::new();
    let page = listing(&[
        ("令和8年度 IT導入補助金の公募", "/snavi/articles/101"),
        ("省エネ設備投資への助成金", "/snavi/articles/102"),
    ]);
    let first = h.run(CannedHttp::ok(&page)).unwrap();
    assert_eq!(first.added, 2);
    let before = std::fs::read(h.store_path()).unwrap();

    let second = h.run(CannedHttp::ok(&page)).unwrap();
    assert_eq!(second.added, 0);
    assert!(!second.store_written);
    assert_eq!(std::fs::read(h.store_path()).unwrap(), before);
}

#[test]
fn test_known_title_with_different_link_is_not_added() {
    let h = Harness::new();
    h.seed(&[record(
        "ものづくり補助金の公募開始",
        "https://j-net21.smrj.go.jp/snavi/articles/1",
        "2024-01-01",
    )]);
    let page = listing(&[("ものづくり補助金の公募開始", "/snavi/articles/999")]);
    let report = h.run(CannedHttp::ok(&page)).unwrap();
    assert_eq!(report.added, 0);
    let stored = h.stored();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].link.ends_with("/snavi/articles/1"));
}

#[test]
fn test_legacy_title_with_ideographic_space_is_not_re_added() {
    let h = Harness::new();
    let legacy = record(
        "令和7年度\u{3000}IT導入補助金の公募",
        "https://j-net21.smrj.go.jp/snavi/articles/100",
        "2024-01-01",
    );
    h.seed(&[legacy.clone()]);
    let before = std::fs::read(h.store_path()).unwrap();

    let page = listing(&[("令和7年度\u{3000}IT導入補助金の公募", "/snavi/articles/100")]);
    let report = h.run(CannedHttp::ok(&page)).unwrap();

    assert_eq!(report.added, 0);
    assert!(!report.store_written);
    assert_eq!(h.stored(), vec![legacy]);
    assert_eq!(std::fs::read(h.store_path()).unwrap(), before);
}

#[test]
fn test_cap_keeps_newest_and_evicts_oldest() {
    let h = Harness::new().with_cap(4);
    h.seed(&[
        record("既存のお知らせ1", "u1", "2024-01-04"),
        record("既存のお知らせ2", "u2", "2024-01-03"),
        record("既存のお知らせ3", "u3", "2024-01-02"),
        record("既存のお知らせ4", "u4", "2024-01-01"),
    ]);
    let page = listing(&[
        ("新しいお知らせA", "/snavi/articles/11"),
        ("新しいお知らせB", "/snavi/articles/12"),
    ]);
    let report = h.run(CannedHttp::ok(&page)).unwrap();
    assert_eq!(report.added, 2);
    assert_eq!(report.evicted, 2);
    let titles: Vec<String> = h.stored().into_iter().map(|r| r.title).collect();
    assert_eq!(
        titles,
        vec!["新しいお知らせA", "新しいお知らせB", "既存のお知らせ1", "既存のお知らせ2"]
    );
}

#[test]
fn test_tags_in_vocabulary_order_without_duplicates() {
    let h = Harness::new();
    let page = listing(&[("補助金で進めるDX、DX人材の雇用支援", "/snavi/articles/5")]);
    h.run(CannedHttp::ok(&page)).unwrap();
    let stored = h.stored();
    assert_eq!(stored[0].tags, vec!["DX", "雇用", "補助金"]);
}

#[test]
fn test_fetch_failure_keeps_store_and_still_renders() {
    let h = Harness::new();
    h.seed(&[record("前回取得したお知らせ", "u1", "2024-01-01")]);
    let before = std::fs::read(h.store_path()).unwrap();

    let report = h
        .run(CannedHttp::with(Err(Error::http("connection refused"))))
        .unwrap();

    assert!(report.fetch_failed);
    assert_eq!(report.added, 0);
    assert_eq!(report.total, 1);
    assert_eq!(std::fs::read(h.store_path()).unwrap(), before);
    let html = std::fs::read_to_string(h.index_path()).unwrap();
    assert!(html.contains("前回取得したお知らせ"));
    assert_eq!(h.warnings(), vec!["fetch"]);
}

#[test]
fn test_non_2xx_and_timeout_are_recovered() {
    for result in [
        Ok(HttpResponse {
            status: 503,
            body: b"maintenance".to_vec(),
        }),
        Err(Error::timeout("timed out")),
    ] {
        let h = Harness::new();
        h.seed(&[record("前回取得したお知らせ", "u1", "2024-01-01")]);
        let before = std::fs::read(h.store_path()).unwrap();
        let report = h.run(CannedHttp::with(result)).unwrap();
        assert!(report.fetch_failed);
        assert_eq!(std::fs::read(h.store_path()).unwrap(), before);
    }
}

#[test]
fn test_empty_body_is_recovered_as_zero_candidates() {
    let h = Harness::new();
    let report = h.run(CannedHttp::ok("")).unwrap();
    assert!(report.fetch_failed);
    assert_eq!(report.added, 0);
    assert_eq!(h.warnings(), vec!["parse"]);
    assert!(h.index_path().exists());
}

#[test]
fn test_same_title_twice_in_one_page_collapses_to_first() {
    // タイトルを同一性の鍵にしているので、別の告知でも同名なら 1 件になる
    let h = Harness::new();
    let page = listing(&[
        ("事業承継補助金のご案内", "/snavi/articles/1"),
        ("事業承継補助金のご案内", "/snavi/articles/2"),
    ]);
    let report = h.run(CannedHttp::ok(&page)).unwrap();
    assert_eq!(report.added, 1);
    let stored = h.stored();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].link.ends_with("/snavi/articles/1"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let mut h = Harness::new();
    h.config.dry_run = true;
    let page = listing(&[("創業支援の助成金", "/snavi/articles/3")]);
    let report = h.run(CannedHttp::ok(&page)).unwrap();
    assert_eq!(report.added, 1);
    assert!(!report.store_written);
    assert!(report.rendered.is_empty());
    assert!(!h.store_path().exists());
    assert!(!h.index_path().exists());
}

#[test]
fn test_fetch_is_attempted_once() {
    let h = Harness::new();
    let http = Arc::new(CannedHttp::with(Err(Error::http("down"))));
    h.pipeline(http.clone(), None).run(&h.config).unwrap();
    assert_eq!(http.calls(), 1);
}

#[test]
fn test_sitemap_written_when_site_url_set() {
    let mut h = Harness::new();
    h.config.render.site_url = Some("https://navi.example/".to_string());
    let report = h.run(CannedHttp::ok(&listing(&[]))).unwrap();
    assert_eq!(report.rendered.len(), 2);
    let xml = std::fs::read_to_string(h.config.render.out_dir.join("sitemap.xml")).unwrap();
    assert!(xml.contains(&format!("<lastmod>{}</lastmod>", TODAY)));
}
