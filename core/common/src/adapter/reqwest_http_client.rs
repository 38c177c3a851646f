//! reqwest (blocking) による HttpClient 実装

use crate::error::Error;
use crate::ports::outbound::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// reqwest::blocking を使う HttpClient
///
/// タイムアウトはリクエストごとに HttpRequest から設定する。リダイレクトは reqwest の既定に従う。
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::system(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        }
        .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| classify(&request.url, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| classify(&request.url, e))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// URL にクエリで API キーを載せるプロバイダがあるので、メッセージにはクエリを含めない
fn classify(url: &str, e: reqwest::Error) -> Error {
    let shown = url.split('?').next().unwrap_or(url);
    if e.is_timeout() {
        Error::timeout(format!("Request to {} timed out", shown))
    } else {
        Error::http(format!("HTTP request to {} failed: {}", shown, e.without_url()))
    }
}
