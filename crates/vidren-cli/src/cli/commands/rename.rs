//! `vidren rename <input.json>` – resolve every filename and write the CSV mapping.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use vidren_core::batch::{self, Batch};
use vidren_core::cache::ResolutionCache;
use vidren_core::config::RenameConfig;
use vidren_core::control::CancelToken;
use vidren_core::fetch::CurlFetcher;
use vidren_core::mapping;
use vidren_core::page::ChromeFetcher;
use vidren_core::pipeline::{BatchObserver, BatchOutcome, ResolutionPipeline};
use vidren_core::politeness::PolitenessScheduler;
use vidren_core::record::{RenameOutcome, RenameRecord};
use vidren_core::strategy::{ContentPortalStrategy, StandardCatalogStrategy, StrategyTable};

const EXIT_INTERRUPTED: i32 = 130;

/// Console progress in the `[i/n] Processing: ...` layout.
struct ConsoleObserver {
    total: usize,
}

impl BatchObserver for ConsoleObserver {
    fn on_start(&mut self, index: usize, filename: &str) {
        println!("\n[{}/{}] Processing: {}", index, self.total, filename);
    }

    fn on_record(&mut self, _index: usize, record: &RenameRecord) {
        match &record.outcome {
            RenameOutcome::Renamed(name) => println!("  ✓ New filename: {}", name),
            RenameOutcome::Failed(reason) => println!("  ✗ {}", reason),
        }
    }
}

pub async fn run_rename(cfg: RenameConfig, input: &Path, output: &Path) -> Result<i32> {
    cfg.validate().context("invalid configuration")?;
    let batch = batch::load_batch(input)?;
    println!("Found {} items in {}", batch.total_items, input.display());
    if batch.is_empty() {
        println!("No files to process.");
        return Ok(1);
    }
    println!("Processing {} files...", batch.len());

    let cancel = CancelToken::new();
    tokio::spawn(watch_interrupts(cancel.clone()));

    let outcome = tokio::task::spawn_blocking({
        let cancel = cancel.clone();
        move || resolve_batch(&cfg, batch, &cancel)
    })
    .await
    .context("rename task join")??;

    let written = export_mapping(&outcome, output)?;
    let interrupted = cancel.is_cancelled();
    print_summary(&outcome, interrupted, written.map(|rows| (output, rows)));

    Ok(exit_code(&outcome, interrupted))
}

/// First Ctrl-C stops the batch after the current file; a second one quits at once.
async fn watch_interrupts(cancel: CancelToken) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    eprintln!("\nInterrupted; stopping after the current file. Press Ctrl-C again to quit now.");
    tracing::warn!("interrupt received");
    cancel.cancel();

    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("second interrupt, exiting immediately");
        std::process::exit(EXIT_INTERRUPTED);
    }
}

/// Write the CSV when at least one record succeeded. Returns the row count.
fn export_mapping(outcome: &BatchOutcome, output: &Path) -> Result<Option<usize>> {
    if !outcome.any_succeeded() {
        return Ok(None);
    }
    Ok(Some(mapping::write_mapping_csv(output, &outcome.records)?))
}

/// 130 after an interrupt (even one that landed during the last file),
/// otherwise 0 iff something was renamed.
fn exit_code(outcome: &BatchOutcome, interrupted: bool) -> i32 {
    if outcome.cancelled || interrupted {
        EXIT_INTERRUPTED
    } else if outcome.any_succeeded() {
        0
    } else {
        1
    }
}

/// Runs in the current thread; owns the browser for the whole batch.
fn resolve_batch(cfg: &RenameConfig, batch: Batch, cancel: &CancelToken) -> Result<BatchOutcome> {
    let (min_delay, max_delay) = cfg.delay_bounds()?;
    let portal_cfg = cfg.portal_config();
    let catalog_cfg = cfg.catalog_config();

    let browser = ChromeFetcher::launch(
        portal_cfg.headless,
        Duration::from_secs(portal_cfg.idle_browser_timeout_secs),
    )?;
    let http = CurlFetcher::new(Duration::from_secs(catalog_cfg.timeout_secs));
    let strategies = StrategyTable::new(
        Box::new(StandardCatalogStrategy::new(http, cfg.catalog_settings())),
        Box::new(ContentPortalStrategy::new(browser, cfg.portal_settings())),
    );
    let mut pipeline = ResolutionPipeline::new(
        cfg.filename_rules(),
        strategies,
        ResolutionCache::new(),
        PolitenessScheduler::new(min_delay, max_delay),
    );

    let mut observer = ConsoleObserver { total: batch.len() };
    let outcome = pipeline.run(batch, cancel, &mut observer);
    tracing::info!(
        records = outcome.records.len(),
        succeeded = outcome.succeeded(),
        lookups = pipeline.cache().len(),
        cancelled = outcome.cancelled,
        "batch finished"
    );
    Ok(outcome)
}

fn print_summary(outcome: &BatchOutcome, interrupted: bool, csv: Option<(&Path, usize)>) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    match csv {
        Some((path, rows)) => {
            println!("✓ CSV file generated: {} ({} rows)", path.display(), rows)
        }
        None => println!("✗ No files were successfully processed. CSV not generated."),
    }
    println!("✓ Successfully processed: {} files", outcome.succeeded());
    if outcome.failed() > 0 {
        println!("✗ Failed: {} files", outcome.failed());
    }
    if interrupted {
        println!("! Interrupted before the end of the batch");
    }
    println!("{rule}");
}
