//! JSON batch input: `{"data": [{"n": "<filename>"}, ...]}`.
//!
//! Items without a non-empty `n` are skipped. Other keys are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
    #[error("input is not a file: {0}")]
    NotAFile(PathBuf),
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct BatchDocument {
    #[serde(default)]
    data: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
struct BatchItem {
    #[serde(default)]
    n: Option<String>,
}

/// Filenames to process, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Entries in `data`, including skipped ones.
    pub total_items: usize,
    pub filenames: Vec<String>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }
}

impl IntoIterator for Batch {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.filenames.into_iter()
    }
}

pub fn parse_batch(text: &str) -> Result<Batch, serde_json::Error> {
    let doc: BatchDocument = serde_json::from_str(text)?;
    let total_items = doc.data.len();
    let filenames = doc
        .data
        .into_iter()
        .filter_map(|item| item.n)
        .filter(|n| !n.is_empty())
        .collect();
    Ok(Batch {
        total_items,
        filenames,
    })
}

pub fn load_batch(path: &Path) -> Result<Batch, BatchError> {
    if !path.exists() {
        return Err(BatchError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(BatchError::NotAFile(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let batch = parse_batch(&text).map_err(|source| BatchError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        items = batch.total_items,
        files = batch.len(),
        "batch loaded"
    );
    Ok(batch)
}
