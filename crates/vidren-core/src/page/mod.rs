//! Page fetcher interface used by the content portal strategy.
//!
//! A [`PageFetcher`] hands out one [`PageHandle`] per lookup; the strategy
//! wraps it in a [`PageGuard`] so the page is closed on every exit path.
//! [`ChromeFetcher`] drives a single shared headless Chromium for the run.

mod chrome;
mod guard;

pub use chrome::ChromeFetcher;
pub use guard::PageGuard;

use std::time::Duration;
use thiserror::Error;

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// The document has been parsed; subresources may still be loading.
    #[default]
    DomContentLoaded,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("could not open page: {0}")]
    Open(String),
    #[error("navigation to {url} failed: {detail}")]
    Navigation { url: String, detail: String },
    #[error("navigation did not settle: {0}")]
    Settle(String),
    #[error("could not read page: {0}")]
    Read(String),
    #[error("page interaction failed: {0}")]
    Interaction(String),
    #[error("could not close page: {0}")]
    Close(String),
}

/// Source of browser pages. One instance lives for the whole run.
pub trait PageFetcher {
    fn open_page(&self) -> Result<Box<dyn PageHandle>, PageError>;
}

/// A single open page (tab).
pub trait PageHandle {
    fn navigate(&self, url: &str, wait: WaitPolicy, timeout: Duration) -> Result<(), PageError>;

    /// Block until a navigation started by an interaction has settled.
    fn wait_for_navigation(&self, wait: WaitPolicy, timeout: Duration) -> Result<(), PageError>;

    fn title(&self) -> Result<String, PageError>;

    /// Rendered HTML of the current document.
    fn content(&self) -> Result<String, PageError>;

    /// First element matching a CSS selector, if any.
    fn find<'a>(&'a self, selector: &str)
        -> Result<Option<Box<dyn ElementHandle + 'a>>, PageError>;

    fn close(&self) -> Result<(), PageError>;
}

pub trait ElementHandle {
    fn click(&self) -> Result<(), PageError>;
}

/// Fixed pause so deferred content can render after a navigation.
pub(crate) fn settle(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}
