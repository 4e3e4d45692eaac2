//! libcurl GET with custom headers.

use std::collections::HashMap;
use std::time::Duration;

use super::{HttpFetcher, HttpResponse, TransportError};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// One easy handle per request; follows redirects.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT.min(timeout),
            timeout,
        }
    }
}

impl HttpFetcher for CurlFetcher {
    /// Runs in the current thread; call from `spawn_blocking` if used from async code.
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, TransportError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)
            .map_err(|_| TransportError::InvalidUrl(url.to_string()))?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.accept_encoding("")?; // let curl decode gzip/deflate/br
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        // Build curl list for custom headers (e.g. "Name: value").
        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(%url, status, bytes = body.len(), "GET finished");
        Ok(HttpResponse { status, body })
    }
}
