//! Filename parsing: site prefix, identifier token, and residual suffix.
//!
//! All operations are pure functions over the input string. The prefix and
//! noise-suffix tables are data (see [`FilenameRules`]) so new distribution
//! origins can be added from config without touching the parser.
//!
//! For `<prefix><identifier><suffix>.<ext>` the parser guarantees that the
//! prefix-stripped stem equals `identifier + suffix`.

mod identifier;
mod prefix;

/// Site prefixes recognised out of the box, in match order.
pub const DEFAULT_SITE_PREFIXES: &[&str] = &["hhd800.com@", "4k2.me@"];

/// Noise trailing the identifier token that is not part of the code.
pub const DEFAULT_NOISE_SUFFIXES: &[&str] = &["hhb", "ch"];

/// Ordered prefix and noise-suffix tables used by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameRules {
    pub site_prefixes: Vec<String>,
    pub noise_suffixes: Vec<String>,
}

impl Default for FilenameRules {
    fn default() -> Self {
        Self {
            site_prefixes: DEFAULT_SITE_PREFIXES.iter().map(|s| s.to_string()).collect(),
            noise_suffixes: DEFAULT_NOISE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A filename broken into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename<'a> {
    pub prefix: Option<&'a str>,
    pub identifier: &'a str,
    pub suffix: &'a str,
}

impl FilenameRules {
    /// Empty entries are dropped; they would match every filename.
    pub fn new(site_prefixes: Vec<String>, noise_suffixes: Vec<String>) -> Self {
        Self {
            site_prefixes: site_prefixes.into_iter().filter(|s| !s.is_empty()).collect(),
            noise_suffixes: noise_suffixes.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Identifier and suffix in one pass, or `None` if no identifier can be extracted.
    pub fn parse<'a>(&self, filename: &'a str) -> Option<ParsedFilename<'a>> {
        let (_, prefix) = self.strip_prefix(filename);
        let identifier = self.extract_identifier(filename)?;
        Some(ParsedFilename {
            prefix,
            identifier,
            suffix: self.extract_suffix(filename),
        })
    }
}
