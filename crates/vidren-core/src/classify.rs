//! Identifier classification: picks which source can resolve an identifier.
//!
//! The two sources use incompatible conventions (hyphenated uppercase codes
//! versus lowercase alphanumeric catalog tokens), so a misclassified token
//! fails its lookup instead of resolving to a wrong performer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static STANDARD_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+-\d+$").expect("standard code regex should compile"));

/// Which resolution strategy applies to an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierClass {
    /// Uppercase letters, one hyphen, digits (e.g. `ABF-284`).
    StandardCode,
    /// Anything else that was extractable (e.g. `mfyd00001`).
    PortalCode,
}

impl IdentifierClass {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierClass::StandardCode => "standard",
            IdentifierClass::PortalCode => "portal",
        }
    }
}

impl fmt::Display for IdentifierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(identifier: &str) -> IdentifierClass {
    if STANDARD_CODE.is_match(identifier) {
        IdentifierClass::StandardCode
    } else {
        IdentifierClass::PortalCode
    }
}
