//! HttpClient ポートで一覧ページを取得する SourceFetcher

use std::sync::Arc;

use common::ports::outbound::{HttpClient, HttpRequest};

use crate::domain::{FetchError, SourceConfig};
use crate::ports::outbound::{FetchedPage, SourceFetcher};

pub struct HttpSourceFetcher {
    http: Arc<dyn HttpClient>,
    source: SourceConfig,
}

impl HttpSourceFetcher {
    pub fn new(http: Arc<dyn HttpClient>, source: SourceConfig) -> Self {
        Self { http, source }
    }
}

impl SourceFetcher for HttpSourceFetcher {
    fn fetch(&self) -> Result<FetchedPage, FetchError> {
        let url = self.source.url.as_str();
        let req = HttpRequest::get(url, self.source.timeout)
            .header("User-Agent", &self.source.user_agent)
            .header("Accept-Language", &self.source.accept_language);
        let resp = self
            .http
            .send(&req)
            .map_err(|e| FetchError::from_transport(url, e))?;
        if !resp.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status,
            });
        }
        let (markup, lossy) = decode_body(resp.body);
        Ok(FetchedPage { markup, lossy })
    }
}

/// UTF-8 としてデコードし、不正なバイト列は置換文字にする
fn decode_body(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error;
    use common::ports::outbound::HttpResponse;
    use std::sync::Mutex;
    use std::time::Duration;

    struct CannedHttp {
        result: Result<HttpResponse, Error>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl HttpClient for CannedHttp {
        fn send(&self, req: &HttpRequest) -> Result<HttpResponse, Error> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(req.clone());
            }
            self.result.clone()
        }
    }

    fn fetcher(result: Result<HttpResponse, Error>) -> (HttpSourceFetcher, Arc<CannedHttp>) {
        let http = Arc::new(CannedHttp {
            result,
            seen: Mutex::new(Vec::new()),
        });
        let source = SourceConfig::new("https://example.jp/list", Duration::from_secs(7)).unwrap();
        (HttpSourceFetcher::new(http.clone(), source), http)
    }

    #[test]
    fn test_fetch_sends_headers_and_timeout() {
        let (f, http) = fetcher(Ok(HttpResponse {
            status: 200,
            body: "<html></html>".as_bytes().to_vec(),
        }));
        let page = f.fetch().unwrap();
        assert_eq!(page.markup, "<html></html>");
        assert!(!page.lossy);
        let seen = http.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].timeout, Duration::from_secs(7));
        assert_eq!(seen[0].header_value("Accept-Language"), Some("ja,en;q=0.8"));
        assert!(seen[0].header_value("User-Agent").is_some());
    }

    #[test]
    fn test_non_2xx_is_status_error() {
        let (f, _) = fetcher(Ok(HttpResponse {
            status: 503,
            body: vec![],
        }));
        assert_eq!(
            f.fetch().unwrap_err(),
            FetchError::Status {
                url: "https://example.jp/list".to_string(),
                status: 503
            }
        );
    }

    #[test]
    fn test_timeout_is_classified() {
        let (f, _) = fetcher(Err(Error::timeout("operation timed out")));
        assert_eq!(f.fetch().unwrap_err().kind(), "timeout");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut body = "補助金".as_bytes().to_vec();
        body.push(0xff);
        let (f, _) = fetcher(Ok(HttpResponse { status: 200, body }));
        let page = f.fetch().unwrap();
        assert!(page.lossy);
        assert!(page.markup.starts_with("補助金"));
        assert!(page.markup.ends_with('\u{FFFD}'));
    }
}
