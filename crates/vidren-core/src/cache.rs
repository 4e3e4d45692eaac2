//! Per-run memo of identifier lookups.
//!
//! Failures are cached too, so an identifier shared by many filenames costs
//! at most one network attempt per run. The cache is owned by whoever builds
//! the pipeline; there is no process-wide instance.

use std::collections::HashMap;

use crate::record::Resolution;

/// Result of [`ResolutionCache::get_or_resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    pub resolution: Resolution,
    /// True only when this call ran the resolver.
    pub fetched: bool,
}

#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, Resolution>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored result for `identifier`, running `resolve` on the
    /// first request only.
    pub fn get_or_resolve<F>(&mut self, identifier: &str, resolve: F) -> CacheLookup
    where
        F: FnOnce(&str) -> Resolution,
    {
        if let Some(resolution) = self.entries.get(identifier) {
            tracing::debug!(%identifier, "using cached result");
            return CacheLookup {
                resolution: resolution.clone(),
                fetched: false,
            };
        }

        let resolution = resolve(identifier);
        self.entries
            .insert(identifier.to_string(), resolution.clone());
        CacheLookup {
            resolution,
            fetched: true,
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&Resolution> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
