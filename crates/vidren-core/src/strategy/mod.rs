//! Performer lookup strategies, one per identifier class.
//!
//! The pipeline only depends on [`PerformerSource`]; which source runs for
//! an identifier is a fixed table lookup on its [`IdentifierClass`].

mod catalog;
mod consent;
mod extract;
mod portal;

pub use catalog::{CatalogSettings, StandardCatalogStrategy};
pub use consent::{ConsentGateHandler, ConsentSettings, ConsentState};
pub use extract::{scan_cast_marker, scan_star_name, title_fallback};
pub use portal::{ContentPortalStrategy, PortalSettings};

use crate::classify::IdentifierClass;
use crate::record::Resolution;

/// Turns an identifier into a performer name using one external source.
///
/// Implementations never propagate transport errors; every failure is a
/// [`FailureReason`](crate::record::FailureReason) in the returned value.
pub trait PerformerSource {
    fn resolve(&self, identifier: &str) -> Resolution;
}

/// Fixed mapping from identifier class to source.
pub struct StrategyTable {
    standard: Box<dyn PerformerSource>,
    portal: Box<dyn PerformerSource>,
}

impl StrategyTable {
    pub fn new(standard: Box<dyn PerformerSource>, portal: Box<dyn PerformerSource>) -> Self {
        Self { standard, portal }
    }

    pub fn strategy_for(&self, class: IdentifierClass) -> &dyn PerformerSource {
        match class {
            IdentifierClass::StandardCode => self.standard.as_ref(),
            IdentifierClass::PortalCode => self.portal.as_ref(),
        }
    }
}
