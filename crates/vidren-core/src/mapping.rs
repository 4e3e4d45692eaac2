//! CSV export of successful renames in the rename-template layout.
//!
//! UTF-8 with a byte-order mark and CRLF line endings.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::record::RenameRecord;

/// Header row of the rename template. Must stay unchanged.
pub const HEADER: [&str; 3] = ["原名称", "新名称", "注：1、第一行固定不变、删除模板无效；"];

const BOM: &str = "\u{FEFF}";

/// Write the header plus one row per successful record to `writer`.
/// Returns the number of data rows.
pub fn write_mapping<W: Write>(mut writer: W, records: &[RenameRecord]) -> Result<usize> {
    writer.write_all(BOM.as_bytes())?;
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(HEADER)?;
    let mut rows = 0;
    for record in records {
        if let Some(resolved) = record.resolved() {
            csv.write_record([record.original.as_str(), resolved, ""])?;
            rows += 1;
        }
    }
    csv.flush()?;
    Ok(rows)
}

/// Write the mapping to `path`, creating parent directories as needed.
pub fn write_mapping_csv(path: &Path, records: &[RenameRecord]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    let rows = write_mapping(std::io::BufWriter::new(file), records)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows, "mapping written");
    Ok(rows)
}
