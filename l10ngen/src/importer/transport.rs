//! HTTP transport used by the spreadsheet strategies.
//!
//! The strategies only see the [`Transport`] trait, so tests can script
//! responses without a network.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Error;

const TIMEOUT_SECS: u64 = 30;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal blocking HTTP client interface.
///
/// Implementations return `Ok` for any completed exchange, whatever the
/// status code, and `Err(Error::SourceUnavailable)` only when no response was
/// received.
pub trait Transport {
    /// GET `url`, optionally with a bearer token.
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, Error>;

    /// POST an `application/x-www-form-urlencoded` body to `url`.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, Error>;
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(concat!("l10ngen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::source_unavailable("cannot build HTTP client", Some(Box::new(e))))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<HttpResponse, Error> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .map_err(|e| Error::source_unavailable("request failed", Some(Box::new(e))))?;
        into_http_response(response)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, Error> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .map_err(|e| Error::source_unavailable("request failed", Some(Box::new(e))))?;
        into_http_response(response)
    }
}

fn into_http_response(response: reqwest::blocking::Response) -> Result<HttpResponse, Error> {
    let status = response.status().as_u16();
    // Read as text first so that an error body survives a failed JSON decode.
    let body = response
        .text()
        .map_err(|e| Error::source_unavailable("cannot read response body", Some(Box::new(e))))?;
    Ok(HttpResponse { status, body })
}
