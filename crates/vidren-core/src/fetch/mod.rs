//! HTTP fetcher used by the catalog strategy.
//!
//! The strategy only depends on [`HttpFetcher`]; [`CurlFetcher`] is the
//! libcurl-backed implementation used at runtime.

mod curl_get;

pub use curl_get::CurlFetcher;

use std::collections::HashMap;
use thiserror::Error;

/// Status and raw body of a completed GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; non-2xx statuses and invalid UTF-8 are errors.
    pub fn into_text(self) -> Result<String, TransportError> {
        if !self.is_success() {
            return Err(TransportError::Status(self.status));
        }
        Ok(String::from_utf8(self.body)?)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Status(u32),
    #[error("response is not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Blocking `GET url` with extra request headers.
pub trait HttpFetcher {
    fn get(&self, url: &str, headers: &HashMap<String, String>)
        -> Result<HttpResponse, TransportError>;
}
