//! Age/consent interstitial handling for the content portal.
//!
//! ```text
//! Unknown ──check──> Clear
//!    │
//!    └────check──> GateDetected ──click──> Cleared
//!                       │
//!                       └──no control──> Unresolvable
//! ```
//!
//! The handler runs at most once per lookup; later calls report the state
//! reached by the first run.

use std::time::Duration;

use crate::page::{self, PageHandle, WaitPolicy};
use crate::record::FailureReason;

/// Gate detection and confirmation parameters.
#[derive(Debug, Clone)]
pub struct ConsentSettings {
    /// Substring of the interstitial's page title.
    pub gate_title: String,
    /// CSS selector of the confirmation link.
    pub confirm_selector: String,
    pub navigation_timeout: Duration,
    /// Pause after the confirmation navigation, for deferred scripts.
    pub settle_after_confirm: Duration,
}

impl Default for ConsentSettings {
    fn default() -> Self {
        Self {
            gate_title: "年齢認証".to_string(),
            confirm_selector: r#"a[href*="declared=yes"]"#.to_string(),
            navigation_timeout: Duration::from_secs(30),
            settle_after_confirm: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    /// Not checked yet.
    Unknown,
    /// No gate on the page.
    Clear,
    /// Gate seen, confirmation not attempted yet.
    GateDetected,
    /// Gate confirmed; content is reachable.
    Cleared,
    /// Gate seen but there was nothing to click.
    Unresolvable,
}

#[derive(Debug)]
pub struct ConsentGateHandler<'s> {
    settings: &'s ConsentSettings,
    state: ConsentState,
}

impl<'s> ConsentGateHandler<'s> {
    pub fn new(settings: &'s ConsentSettings) -> Self {
        Self {
            settings,
            state: ConsentState::Unknown,
        }
    }

    pub fn state(&self) -> ConsentState {
        self.state
    }

    /// Check the page for the gate and clear it if possible.
    ///
    /// `Ok` means extraction may proceed (`Clear` or `Cleared`). A gate
    /// without a confirmation control fails the identifier with
    /// [`FailureReason::ConsentGateUnresolvable`].
    pub fn run(&mut self, page: &dyn PageHandle) -> Result<ConsentState, FailureReason> {
        match self.state {
            ConsentState::Unknown => {}
            ConsentState::Unresolvable => return Err(FailureReason::ConsentGateUnresolvable),
            settled => return Ok(settled),
        }

        let title = page.title().map_err(transport)?;
        if !title.contains(self.settings.gate_title.as_str()) {
            self.state = ConsentState::Clear;
            return Ok(self.state);
        }

        self.state = ConsentState::GateDetected;
        tracing::debug!("age confirmation detected, clicking continue");

        let control = page
            .find(&self.settings.confirm_selector)
            .map_err(transport)?;
        let Some(control) = control else {
            tracing::debug!("could not find confirmation control");
            self.state = ConsentState::Unresolvable;
            return Err(FailureReason::ConsentGateUnresolvable);
        };

        control.click().map_err(transport)?;
        page.wait_for_navigation(WaitPolicy::DomContentLoaded, self.settings.navigation_timeout)
            .map_err(transport)?;
        page::settle(self.settings.settle_after_confirm);

        self.state = ConsentState::Cleared;
        Ok(self.state)
    }
}

fn transport(err: crate::page::PageError) -> FailureReason {
    FailureReason::Transport(err.to_string())
}
