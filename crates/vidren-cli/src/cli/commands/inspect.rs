//! `vidren inspect <filename>...` – offline parse and classification.

use anyhow::Result;
use vidren_core::classify::classify;
use vidren_core::config::RenameConfig;

pub fn run_inspect(cfg: &RenameConfig, filenames: &[String]) -> Result<i32> {
    let rules = cfg.filename_rules();
    let mut unparsed = 0;
    for filename in filenames {
        println!("{filename}");
        match rules.parse(filename) {
            Some(parsed) => {
                println!("  prefix:     {}", parsed.prefix.unwrap_or("-"));
                println!("  identifier: {}", parsed.identifier);
                println!("  suffix:     {}", parsed.suffix);
                println!("  class:      {}", classify(parsed.identifier));
            }
            None => {
                println!("  ✗ Could not extract video ID");
                unparsed += 1;
            }
        }
    }
    Ok(if unparsed == filenames.len() { 1 } else { 0 })
}
