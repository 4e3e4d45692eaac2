//! Catalog lookup for standard codes: one GET, one pattern, no retries.

use std::collections::HashMap;

use url::Url;

use crate::fetch::{HttpFetcher, TransportError};
use crate::record::{FailureReason, Resolution};

use super::extract::scan_star_name;
use super::PerformerSource;

/// Where the catalog lives and how requests present themselves.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub cookie: String,
    pub user_agent: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.javbus.com/".to_string(),
            cookie: "existmag=mag; age=verified; dv=1".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl CatalogSettings {
    /// `<base_url>/<code>`, with the code percent-encoded as one path segment.
    pub fn page_url(&self, code: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(code);
        Ok(url)
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("Cookie".to_string(), self.cookie.clone()),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ])
    }
}

pub struct StandardCatalogStrategy<H> {
    http: H,
    settings: CatalogSettings,
}

impl<H: HttpFetcher> StandardCatalogStrategy<H> {
    pub fn new(http: H, settings: CatalogSettings) -> Self {
        Self { http, settings }
    }

    fn fetch_page(&self, code: &str) -> Result<String, TransportError> {
        let url = self.settings.page_url(code)?;
        tracing::debug!("fetching: {url}");
        self.http
            .get(url.as_str(), &self.settings.headers())?
            .into_text()
    }
}

impl<H: HttpFetcher> PerformerSource for StandardCatalogStrategy<H> {
    fn resolve(&self, identifier: &str) -> Resolution {
        let html = self.fetch_page(identifier).map_err(|err| {
            tracing::debug!(%identifier, "error fetching from catalog: {err}");
            FailureReason::Transport(err.to_string())
        })?;

        match scan_star_name(&html) {
            Some(name) => {
                tracing::debug!(%identifier, "found performer: {name}");
                Ok(name)
            }
            None => {
                tracing::debug!(%identifier, "performer not found in catalog page");
                Err(FailureReason::PerformerNotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHttp;

    const PAGE: &str = r#"<html><div class="star-name"><a href="/star/x" title="X">X</a></div></html>"#;

    #[test]
    fn page_url_appends_code() {
        let s = CatalogSettings::default();
        assert_eq!(s.page_url("ABF-284").unwrap().as_str(), "https://www.javbus.com/ABF-284");

        let s = CatalogSettings {
            base_url: "http://127.0.0.1:9/catalog".to_string(),
            ..CatalogSettings::default()
        };
        assert_eq!(
            s.page_url("ATID-637").unwrap().as_str(),
            "http://127.0.0.1:9/catalog/ATID-637"
        );
    }

    #[test]
    fn page_url_rejects_bad_base() {
        let s = CatalogSettings {
            base_url: "not a url".to_string(),
            ..CatalogSettings::default()
        };
        assert!(matches!(s.page_url("A-1"), Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn resolves_star_name_with_browser_headers() {
        let http = MockHttp::reply(200, PAGE);
        let requests = http.requests();
        let strategy = StandardCatalogStrategy::new(http, CatalogSettings::default());

        assert_eq!(strategy.resolve("ATID-637"), Ok("X".to_string()));

        let requests = requests.borrow();
        assert_eq!(requests.len(), 1);
        let (url, headers) = &requests[0];
        assert_eq!(url, "https://www.javbus.com/ATID-637");
        assert_eq!(
            headers.get("Cookie").map(String::as_str),
            Some("existmag=mag; age=verified; dv=1")
        );
        assert!(headers["User-Agent"].starts_with("Mozilla/5.0"));
    }

    #[test]
    fn missing_pattern_is_not_found() {
        let strategy = StandardCatalogStrategy::new(
            MockHttp::reply(200, "<html>no cast</html>"),
            CatalogSettings::default(),
        );
        assert_eq!(strategy.resolve("ABF-284"), Err(FailureReason::PerformerNotFound));
    }

    #[test]
    fn non_2xx_is_transport_failure() {
        let strategy = StandardCatalogStrategy::new(
            MockHttp::reply(404, PAGE),
            CatalogSettings::default(),
        );
        assert_eq!(
            strategy.resolve("ABF-284"),
            Err(FailureReason::Transport("HTTP 404".to_string()))
        );
    }

    #[test]
    fn connection_error_is_transport_failure() {
        let http = MockHttp::unreachable();
        let requests = http.requests();
        let strategy = StandardCatalogStrategy::new(http, CatalogSettings::default());
        assert!(matches!(strategy.resolve("ABF-284"), Err(FailureReason::Transport(_))));
        assert_eq!(requests.borrow().len(), 1, "no retry");
    }
}
