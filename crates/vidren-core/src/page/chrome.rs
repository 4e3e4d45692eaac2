//! Headless Chromium page fetcher (headless_chrome, blocking CDP client).

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use headless_chrome::{Browser, Element, LaunchOptions, Tab};

use super::{ElementHandle, PageError, PageFetcher, PageHandle, WaitPolicy};

/// Shared browser for the run; dropping it shuts Chromium down.
pub struct ChromeFetcher {
    browser: Browser,
}

impl ChromeFetcher {
    /// Launch Chromium. Failing here is fatal for the run.
    ///
    /// The connection is dropped after `idle_timeout` without browser
    /// events, so it must outlast the longest stretch between page lookups.
    pub fn launch(headless: bool, idle_timeout: Duration) -> Result<Self> {
        let options = launch_options(headless, idle_timeout)?;
        let browser = Browser::new(options).context("failed to launch Chromium")?;
        tracing::info!("browser started (headless={headless})");
        Ok(Self { browser })
    }
}

fn launch_options(headless: bool, idle_timeout: Duration) -> Result<LaunchOptions<'static>> {
    LaunchOptions::default_builder()
        .headless(headless)
        .idle_browser_timeout(idle_timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("invalid browser launch options")
}

impl PageFetcher for ChromeFetcher {
    fn open_page(&self) -> Result<Box<dyn PageHandle>, PageError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| PageError::Open(e.to_string()))?;
        Ok(Box::new(ChromePage { tab }))
    }
}

struct ChromePage {
    tab: Arc<Tab>,
}

impl ChromePage {
    // headless_chrome only reports "navigated" (frame stopped loading).
    fn wait_navigated(&self, wait: WaitPolicy, timeout: Duration) -> Result<(), String> {
        tracing::trace!(?wait, ?timeout, "waiting for navigation");
        self.tab.set_default_timeout(timeout);
        self.tab
            .wait_until_navigated()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

impl PageHandle for ChromePage {
    fn navigate(&self, url: &str, wait: WaitPolicy, timeout: Duration) -> Result<(), PageError> {
        let navigation_error = |detail: String| PageError::Navigation {
            url: url.to_string(),
            detail,
        };
        self.tab
            .navigate_to(url)
            .map_err(|e| navigation_error(e.to_string()))?;
        self.wait_navigated(wait, timeout).map_err(navigation_error)
    }

    fn wait_for_navigation(&self, wait: WaitPolicy, timeout: Duration) -> Result<(), PageError> {
        self.wait_navigated(wait, timeout).map_err(PageError::Settle)
    }

    fn title(&self) -> Result<String, PageError> {
        self.tab.get_title().map_err(|e| PageError::Read(e.to_string()))
    }

    fn content(&self) -> Result<String, PageError> {
        self.tab
            .get_content()
            .map_err(|e| PageError::Read(e.to_string()))
    }

    fn find<'a>(
        &'a self,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle + 'a>>, PageError> {
        // find_element reports a missing element as an error; treat any
        // failure as "not present".
        match self.tab.find_element(selector) {
            Ok(element) => Ok(Some(Box::new(ChromeElement { element }))),
            Err(err) => {
                tracing::debug!(%selector, "no element: {err}");
                Ok(None)
            }
        }
    }

    fn close(&self) -> Result<(), PageError> {
        self.tab
            .close(true)
            .map(|_| ())
            .map_err(|e| PageError::Close(e.to_string()))
    }
}

struct ChromeElement<'a> {
    element: Element<'a>,
}

impl ElementHandle for ChromeElement<'_> {
    fn click(&self) -> Result<(), PageError> {
        self.element
            .click()
            .map(|_| ())
            .map_err(|e| PageError::Interaction(e.to_string()))
    }
}
