//! Scripted collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::fetch::{HttpFetcher, HttpResponse, TransportError};
use crate::page::{ElementHandle, PageError, PageFetcher, PageHandle, WaitPolicy};
use crate::record::{FailureReason, Resolution};
use crate::strategy::PerformerSource;

const GATE_TITLE: &str = "年齢認証 - FANZA";

/// Source that always answers the same and counts calls.
pub(crate) struct FixedSource {
    resolution: Resolution,
    calls: Rc<Cell<usize>>,
}

impl FixedSource {
    pub(crate) fn found(name: &str) -> Self {
        Self {
            resolution: Ok(name.to_string()),
            calls: Rc::default(),
        }
    }

    pub(crate) fn failing(reason: FailureReason) -> Self {
        Self {
            resolution: Err(reason),
            calls: Rc::default(),
        }
    }

    pub(crate) fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl PerformerSource for FixedSource {
    fn resolve(&self, _identifier: &str) -> Resolution {
        self.calls.set(self.calls.get() + 1);
        self.resolution.clone()
    }
}

type RequestLog = Rc<RefCell<Vec<(String, HashMap<String, String>)>>>;

/// HTTP fetcher returning one canned reply and logging requests.
pub(crate) struct MockHttp {
    reply: Option<(u32, String)>,
    requests: RequestLog,
}

impl MockHttp {
    pub(crate) fn reply(status: u32, body: &str) -> Self {
        Self {
            reply: Some((status, body.to_string())),
            requests: Rc::default(),
        }
    }

    /// Every request fails as if the host refused the connection.
    pub(crate) fn unreachable() -> Self {
        Self {
            reply: None,
            requests: Rc::default(),
        }
    }

    pub(crate) fn requests(&self) -> RequestLog {
        Rc::clone(&self.requests)
    }
}

impl HttpFetcher for MockHttp {
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, TransportError> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), headers.clone()));
        match &self.reply {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone().into_bytes(),
            }),
            // CURLE_COULDNT_CONNECT
            None => Err(TransportError::Curl(curl::Error::new(7))),
        }
    }
}

/// What a scripted page shows.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageScript {
    title: String,
    body: String,
    /// `Some(has_confirm_control)` puts a consent gate in front of the content.
    gate: Option<bool>,
    title_error: bool,
    content_error: bool,
    navigate_error: bool,
}

impl PageScript {
    pub(crate) fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub(crate) fn gated(mut self, has_confirm_control: bool) -> Self {
        self.gate = Some(has_confirm_control);
        self
    }

    pub(crate) fn unreadable(mut self) -> Self {
        self.title_error = true;
        self
    }

    pub(crate) fn without_content(mut self) -> Self {
        self.content_error = true;
        self
    }

    pub(crate) fn unreachable(mut self) -> Self {
        self.navigate_error = true;
        self
    }
}

/// Counters shared by every page a fetcher opens.
#[derive(Debug, Default)]
pub(crate) struct PageProbe {
    pub(crate) opened: Cell<usize>,
    pub(crate) closed: Cell<usize>,
    pub(crate) clicks: Cell<usize>,
    pub(crate) title_reads: Cell<usize>,
    pub(crate) navigation_waits: Cell<usize>,
    pub(crate) navigations: RefCell<Vec<String>>,
}

pub(crate) struct MockPage {
    script: PageScript,
    probe: Rc<PageProbe>,
    gate_cleared: Cell<bool>,
}

impl MockPage {
    pub(crate) fn new(script: PageScript) -> (Self, Rc<PageProbe>) {
        let probe = Rc::new(PageProbe::default());
        (Self::with_probe(script, Rc::clone(&probe)), probe)
    }

    fn with_probe(script: PageScript, probe: Rc<PageProbe>) -> Self {
        Self {
            script,
            probe,
            gate_cleared: Cell::new(false),
        }
    }

    fn behind_gate(&self) -> bool {
        self.script.gate.is_some() && !self.gate_cleared.get()
    }
}

impl PageHandle for MockPage {
    fn navigate(&self, url: &str, _wait: WaitPolicy, _timeout: Duration) -> Result<(), PageError> {
        self.probe.navigations.borrow_mut().push(url.to_string());
        if self.script.navigate_error {
            return Err(PageError::Navigation {
                url: url.to_string(),
                detail: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        Ok(())
    }

    fn wait_for_navigation(&self, _wait: WaitPolicy, _timeout: Duration) -> Result<(), PageError> {
        self.probe
            .navigation_waits
            .set(self.probe.navigation_waits.get() + 1);
        Ok(())
    }

    fn title(&self) -> Result<String, PageError> {
        self.probe.title_reads.set(self.probe.title_reads.get() + 1);
        if self.script.title_error {
            return Err(PageError::Read("title unavailable".to_string()));
        }
        if self.behind_gate() {
            return Ok(GATE_TITLE.to_string());
        }
        Ok(self.script.title.clone())
    }

    fn content(&self) -> Result<String, PageError> {
        if self.script.content_error {
            return Err(PageError::Read("content unavailable".to_string()));
        }
        if self.behind_gate() {
            return Ok("<html>年齢認証</html>".to_string());
        }
        Ok(self.script.body.clone())
    }

    fn find<'a>(
        &'a self,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle + 'a>>, PageError> {
        let present = self.script.gate == Some(true)
            && !self.gate_cleared.get()
            && selector.contains("declared=yes");
        Ok(present.then(|| Box::new(MockConfirm { page: self }) as Box<dyn ElementHandle + 'a>))
    }

    fn close(&self) -> Result<(), PageError> {
        self.probe.closed.set(self.probe.closed.get() + 1);
        Ok(())
    }
}

struct MockConfirm<'a> {
    page: &'a MockPage,
}

impl ElementHandle for MockConfirm<'_> {
    fn click(&self) -> Result<(), PageError> {
        let probe = &self.page.probe;
        probe.clicks.set(probe.clicks.get() + 1);
        self.page.gate_cleared.set(true);
        Ok(())
    }
}

/// Opens a fresh [`MockPage`] with the same script for every lookup.
pub(crate) struct MockPageFetcher {
    script: PageScript,
    probe: Rc<PageProbe>,
    fail_open: bool,
}

impl MockPageFetcher {
    pub(crate) fn new(script: PageScript) -> Self {
        Self {
            script,
            probe: Rc::default(),
            fail_open: false,
        }
    }

    pub(crate) fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub(crate) fn probe(&self) -> Rc<PageProbe> {
        Rc::clone(&self.probe)
    }
}

impl PageFetcher for MockPageFetcher {
    fn open_page(&self) -> Result<Box<dyn PageHandle>, PageError> {
        if self.fail_open {
            return Err(PageError::Open("browser disconnected".to_string()));
        }
        self.probe.opened.set(self.probe.opened.get() + 1);
        Ok(Box::new(MockPage::with_probe(
            self.script.clone(),
            Rc::clone(&self.probe),
        )))
    }
}
