//! index.html と sitemap.xml を書き出す SiteRenderer

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::FileSystem;

use crate::domain::jst;
use crate::domain::{Record, RenderConfig, TagVocabulary};
use crate::ports::outbound::{SiteRenderer, SiteView};

const SITE_TITLE: &str = "自治体補助金自動集約ナビ";

const STYLE: &str = r#"body { max-width: 800px; margin: 40px auto; padding: 0 20px; font-family: sans-serif; line-height: 1.6; color: #333; }
header { border-bottom: 3px solid #007bff; margin-bottom: 30px; padding-bottom: 10px; }
h1 { margin: 0; font-size: 1.8rem; }
.updated { color: #888; font-size: 0.9rem; }
article { border: 1px solid #eee; padding: 20px; margin-bottom: 20px; border-radius: 10px; box-shadow: 0 2px 5px rgba(0,0,0,0.05); }
article h2 { color: #2c3e50; margin-top: 0; font-size: 1.2rem; }
.date { font-size: 0.8rem; color: #999; }
.tag { display: inline-block; color: #fff; font-size: 0.75rem; padding: 2px 8px; margin-right: 4px; border-radius: 10px; }
.analysis { font-size: 0.9rem; color: #555; margin: 10px 0 0; padding-left: 1.2em; }
.actions { display: flex; gap: 10px; margin-top: 15px; }
.actions a { flex: 1; text-align: center; padding: 10px; text-decoration: none; border-radius: 5px; font-weight: bold; font-size: 0.9rem; }
.official { background: #f8f9fa; color: #333; border: 1px solid #ddd; }
.consult { background: #28a745; color: #fff; }
"#;

pub struct HtmlSiteRenderer {
    fs: Arc<dyn FileSystem>,
    config: RenderConfig,
}

impl HtmlSiteRenderer {
    pub fn new(fs: Arc<dyn FileSystem>, config: RenderConfig) -> Self {
        Self { fs, config }
    }

    fn render_index(&self, view: &SiteView<'_>) -> String {
        let mut items = String::new();
        let shown = view.records.iter().take(self.config.render_limit);
        for record in shown {
            render_article(&mut items, record, view.vocabulary, self.config.form_url.as_deref());
        }
        if items.is_empty() {
            items.push_str("<p>現在掲載中のお知らせはありません。</p>\n");
        }
        format!(
            r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>【最新】{title}</title>
<style>
{style}</style>
</head>
<body>
<header>
<h1>{title}</h1>
<p class="updated">最終自動更新: {updated}</p>
</header>
<main>
{items}</main>
</body>
</html>
"#,
            title = SITE_TITLE,
            style = STYLE,
            updated = escape(&jst::updated_label(view.now_ms)),
            items = items,
        )
    }
}

fn render_article(out: &mut String, record: &Record, vocabulary: &TagVocabulary, form_url: Option<&str>) {
    let _ = writeln!(out, "<article>");
    let _ = writeln!(out, "<h2>{}</h2>", escape(&record.title));
    let _ = writeln!(out, r#"<p class="date">掲載確認日: {}</p>"#, escape(&record.date));
    if !record.tags.is_empty() {
        out.push_str("<p>");
        for tag in &record.tags {
            let _ = write!(
                out,
                r#"<span class="tag" style="background: {};">{}</span>"#,
                escape(vocabulary.color_of(tag)),
                escape(tag)
            );
        }
        out.push_str("</p>\n");
    }
    if let Some(analysis) = &record.analysis {
        let _ = writeln!(out, r#"<ul class="analysis">"#);
        let _ = writeln!(out, "<li><strong>概要:</strong> {}</li>", escape(&analysis.summary));
        let _ = writeln!(out, "<li><strong>対象:</strong> {}</li>", escape(&analysis.target));
        let _ = writeln!(out, "<li><strong>金額:</strong> {}</li>", escape(&analysis.amount));
        let _ = writeln!(out, "</ul>");
    }
    let _ = writeln!(out, r#"<div class="actions">"#);
    let _ = writeln!(
        out,
        r#"<a class="official" href="{}" target="_blank" rel="noopener">公式詳細を見る</a>"#,
        escape(&record.link)
    );
    if let Some(form) = form_url {
        let _ = writeln!(
            out,
            r#"<a class="consult" href="{}" target="_blank" rel="noopener">専門家に無料相談</a>"#,
            escape(form)
        );
    }
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "</article>");
}

fn render_sitemap(site_url: &str, lastmod: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{}</loc>
    <lastmod>{}</lastmod>
  </url>
</urlset>
"#,
        escape(site_url),
        escape(lastmod)
    )
}

/// HTML / XML 共通のエスケープ
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

impl SiteRenderer for HtmlSiteRenderer {
    fn render(&self, view: &SiteView<'_>) -> Result<Vec<PathBuf>, Error> {
        let mut written = Vec::new();

        let index = self.config.out_dir.join("index.html");
        self.fs.write_atomic(&index, &self.render_index(view))?;
        written.push(index);

        if let Some(site_url) = &self.config.site_url {
            let sitemap = self.config.out_dir.join("sitemap.xml");
            let lastmod = jst::capture_date(view.now_ms);
            self.fs
                .write_atomic(&sitemap, &render_sitemap(site_url, &lastmod))?;
            written.push(sitemap);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Analysis, Candidate};
    use common::adapter::StdFileSystem;

    // 2025-10-19 09:30 JST
    const NOW_MS: u64 = 1_760_833_800_000;

    fn config(out_dir: PathBuf) -> RenderConfig {
        RenderConfig {
            out_dir,
            render_limit: 50,
            site_url: None,
            form_url: None,
        }
    }

    fn record(title: &str) -> Record {
        let vocab = TagVocabulary::default();
        Record::capture(
            Candidate::new(title, "https://j-net21.smrj.go.jp/snavi/articles/1?a=1&b=2"),
            "2026-10-19",
            vocab.classify(title),
            None,
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_index_escapes_and_colors_tags() {
        let dir = tempfile::tempdir().unwrap();
        let r = HtmlSiteRenderer::new(Arc::new(StdFileSystem), config(dir.path().to_path_buf()));
        let records = vec![record("<script>DX補助金</script>")];
        let vocab = TagVocabulary::default();
        let written = r
            .render(&SiteView {
                records: &records,
                vocabulary: &vocab,
                now_ms: NOW_MS,
            })
            .unwrap();
        assert_eq!(written, vec![dir.path().join("index.html")]);
        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("&lt;script&gt;DX補助金&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("background: #6f42c1;"));
        assert!(html.contains("?a=1&amp;b=2"));
        assert!(html.contains("最終自動更新: 2025年10月19日 09:30"));
        assert!(!html.contains("専門家に無料相談"));
        assert!(!dir.path().join("sitemap.xml").exists());
    }

    #[test]
    fn test_render_limit_and_form_link() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path().to_path_buf());
        cfg.render_limit = 2;
        cfg.form_url = Some("https://forms.example/consult".to_string());
        let r = HtmlSiteRenderer::new(Arc::new(StdFileSystem), cfg);
        let mut records: Vec<Record> = (0..5).map(|i| record(&format!("お知らせ{i}"))).collect();
        records[0].analysis = Some(Analysis::default());
        let vocab = TagVocabulary::default();
        r.render(&SiteView {
            records: &records,
            vocabulary: &vocab,
            now_ms: NOW_MS,
        })
        .unwrap();
        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(html.matches("<article>").count(), 2);
        assert!(html.contains("お知らせ1"));
        assert!(!html.contains("お知らせ2"));
        assert!(html.contains("https://forms.example/consult"));
        assert_eq!(html.matches(r#"<ul class="analysis">"#).count(), 1);
    }

    #[test]
    fn test_sitemap_only_with_site_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path().join("public"));
        cfg.site_url = Some("https://navi.example/".to_string());
        let r = HtmlSiteRenderer::new(Arc::new(StdFileSystem), cfg);
        let vocab = TagVocabulary::default();
        let written = r
            .render(&SiteView {
                records: &[],
                vocabulary: &vocab,
                now_ms: NOW_MS,
            })
            .unwrap();
        assert_eq!(written.len(), 2);
        let xml = std::fs::read_to_string(dir.path().join("public").join("sitemap.xml")).unwrap();
        assert!(xml.contains("<loc>https://navi.example/</loc>"));
        assert!(xml.contains("<lastmod>2025-10-19</lastmod>"));
        let html = std::fs::read_to_string(dir.path().join("public").join("index.html")).unwrap();
        assert!(html.contains("現在掲載中のお知らせはありません。"));
    }
}
