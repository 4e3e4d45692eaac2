//! Per-filename results.

use thiserror::Error;

/// Why a single filename could not be renamed. Never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// Filename shape not recognised.
    #[error("identifier not extractable")]
    IdentifierNotExtractable,
    /// Age/consent gate detected but no confirmation control was found.
    #[error("consent gate could not be cleared")]
    ConsentGateUnresolvable,
    /// HTTP or page navigation error, timeout, or undecodable response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Page reached but no extraction pattern matched.
    #[error("performer not found")]
    PerformerNotFound,
}

/// Outcome of a lookup: performer name or the reason there is none.
pub type Resolution = Result<String, FailureReason>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(String),
    Failed(FailureReason),
}

/// One row of the mapping; created once per input filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub original: String,
    pub outcome: RenameOutcome,
}

impl RenameRecord {
    pub fn renamed(original: impl Into<String>, resolved: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            outcome: RenameOutcome::Renamed(resolved.into()),
        }
    }

    pub fn failed(original: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            original: original.into(),
            outcome: RenameOutcome::Failed(reason),
        }
    }

    pub fn resolved(&self) -> Option<&str> {
        match &self.outcome {
            RenameOutcome::Renamed(name) => Some(name),
            RenameOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.outcome {
            RenameOutcome::Renamed(_) => None,
            RenameOutcome::Failed(reason) => Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RenameOutcome::Renamed(_))
    }
}

/// `<performer>-<identifier><suffix>.mp4`
pub fn compose_filename(performer: &str, identifier: &str, suffix: &str) -> String {
    format!("{performer}-{identifier}{suffix}.mp4")
}
