//! Content portal lookup for every identifier that is not a standard code.
//!
//! Opens a page, waits for it to settle, clears the consent gate, then tries
//! the cast-marker body scan and, failing that, the page title.

use std::time::Duration;

use url::Url;

use crate::page::{self, PageFetcher, PageGuard, PageHandle, WaitPolicy};
use crate::record::{FailureReason, Resolution};

use super::consent::{ConsentGateHandler, ConsentSettings};
use super::extract::{scan_cast_marker, title_fallback};
use super::PerformerSource;

#[derive(Debug, Clone)]
pub struct PortalSettings {
    /// Content page; the identifier is added as the `id` query parameter.
    pub base_url: String,
    pub navigation_timeout: Duration,
    /// Pause after the first navigation settles.
    pub settle_after_navigation: Duration,
    pub consent: ConsentSettings,
}

impl PortalSettings {
    pub const DEFAULT_BASE_URL: &'static str = "https://video.dmm.co.jp/av/content/";

    pub fn page_url(&self, identifier: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(&self.base_url, &[("id", identifier)])
    }
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            navigation_timeout: Duration::from_secs(30),
            settle_after_navigation: Duration::from_secs(1),
            consent: ConsentSettings::default(),
        }
    }
}

pub struct ContentPortalStrategy<P> {
    pages: P,
    settings: PortalSettings,
}

impl<P: PageFetcher> ContentPortalStrategy<P> {
    pub fn new(pages: P, settings: PortalSettings) -> Self {
        Self { pages, settings }
    }

    fn open(&self, url: &Url) -> Result<PageGuard, FailureReason> {
        let page = self
            .pages
            .open_page()
            .map(PageGuard::new)
            .map_err(|e| FailureReason::Transport(e.to_string()))?;
        page.navigate(
            url.as_str(),
            WaitPolicy::DomContentLoaded,
            self.settings.navigation_timeout,
        )
        .map_err(|e| FailureReason::Transport(e.to_string()))?;
        page::settle(self.settings.settle_after_navigation);
        Ok(page)
    }
}

impl<P: PageFetcher> PerformerSource for ContentPortalStrategy<P> {
    fn resolve(&self, identifier: &str) -> Resolution {
        let url = self
            .settings
            .page_url(identifier)
            .map_err(|e| FailureReason::Transport(format!("invalid portal URL: {e}")))?;
        tracing::debug!("fetching: {url}");

        let page = self.open(&url).map_err(|err| {
            tracing::debug!(%identifier, "{err}");
            err
        })?;

        ConsentGateHandler::new(&self.settings.consent).run(&*page)?;

        extract_performer(&*page).ok_or(FailureReason::PerformerNotFound)
    }
}

/// Body scan first, title second; read errors fall through to the next tier.
fn extract_performer(page: &dyn PageHandle) -> Option<String> {
    match page.content() {
        Ok(html) => {
            if let Some(name) = scan_cast_marker(&html) {
                tracing::debug!("found performer: {name}");
                return Some(name);
            }
        }
        Err(err) => tracing::debug!("extraction method 1 failed: {err}"),
    }

    match page.title() {
        Ok(title) => {
            let name = title_fallback(&title);
            if let Some(name) = &name {
                tracing::debug!("found performer from title: {name}");
            }
            name
        }
        Err(err) => {
            tracing::debug!("extraction method 2 failed: {err}");
            None
        }
    }
}
