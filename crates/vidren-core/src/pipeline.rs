//! Per-filename orchestration: parse, classify, resolve (cached), pause, compose.
//!
//! Filenames are processed one at a time in input order. The pipeline owns
//! the cache it was given; a fresh cache gives a fully independent run.

use crate::cache::ResolutionCache;
use crate::classify::classify;
use crate::control::CancelToken;
use crate::filename::FilenameRules;
use crate::politeness::PolitenessScheduler;
use crate::record::{compose_filename, FailureReason, RenameRecord};
use crate::strategy::StrategyTable;

/// Progress hooks for a batch run. Both default to no-ops.
pub trait BatchObserver {
    /// Called before `filename` (1-based `index`) is processed.
    fn on_start(&mut self, _index: usize, _filename: &str) {}

    /// Called once the record for `index` exists.
    fn on_record(&mut self, _index: usize, _record: &RenameRecord) {}
}

impl BatchObserver for () {}

/// Records of a (possibly interrupted) batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<RenameRecord>,
    /// The run stopped early on a cancellation request.
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    /// A run is successful when at least one filename was renamed.
    pub fn any_succeeded(&self) -> bool {
        self.records.iter().any(RenameRecord::is_success)
    }
}

pub struct ResolutionPipeline {
    rules: FilenameRules,
    strategies: StrategyTable,
    cache: ResolutionCache,
    politeness: PolitenessScheduler,
}

impl ResolutionPipeline {
    pub fn new(
        rules: FilenameRules,
        strategies: StrategyTable,
        cache: ResolutionCache,
        politeness: PolitenessScheduler,
    ) -> Self {
        Self {
            rules,
            strategies,
            cache,
            politeness,
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolve one filename into its rename record.
    pub fn process(&mut self, filename: &str) -> RenameRecord {
        let Some(identifier) = self.rules.extract_identifier(filename) else {
            tracing::warn!(%filename, "could not extract video ID");
            return RenameRecord::failed(filename, FailureReason::IdentifierNotExtractable);
        };
        let class = classify(identifier);
        tracing::debug!(%identifier, %class, "video ID");

        let strategy = self.strategies.strategy_for(class);
        let lookup = self
            .cache
            .get_or_resolve(identifier, |id| strategy.resolve(id));
        self.politeness.maybe_delay(lookup.fetched);

        match lookup.resolution {
            Ok(performer) => {
                let suffix = self.rules.extract_suffix(filename);
                let resolved = compose_filename(&performer, identifier, suffix);
                tracing::info!(%filename, %resolved, "renamed");
                RenameRecord::renamed(filename, resolved)
            }
            Err(reason) => {
                tracing::warn!(%filename, %identifier, "{reason}");
                RenameRecord::failed(filename, reason)
            }
        }
    }

    /// Process `filenames` in order until exhausted or `cancel` is set.
    ///
    /// Cancellation is checked between filenames; records already produced
    /// are kept.
    pub fn run<I, S>(
        &mut self,
        filenames: I,
        cancel: &CancelToken,
        observer: &mut dyn BatchObserver,
    ) -> BatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = BatchOutcome::default();
        for (i, filename) in filenames.into_iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!("run cancelled after {} file(s)", outcome.records.len());
                outcome.cancelled = true;
                break;
            }
            let index = i + 1;
            let filename = filename.as_ref();
            observer.on_start(index, filename);
            let record = self.process(filename);
            observer.on_record(index, &record);
            outcome.records.push(record);
        }
        outcome
    }
}
