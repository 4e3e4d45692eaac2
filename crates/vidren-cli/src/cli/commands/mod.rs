//! CLI command handlers, one per file.

mod completions;
mod inspect;
mod rename;

pub use completions::{run_completions, run_manpage};
pub use inspect::run_inspect;
pub use rename::run_rename;
