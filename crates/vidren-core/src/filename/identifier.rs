//! Identifier token and suffix extraction.

use super::FilenameRules;

const SEPARATORS: [char; 2] = ['_', '.'];

impl FilenameRules {
    /// Identifier embedded in `filename`: the run of characters after the site
    /// prefix up to the first `_` or `.`, minus the first matching noise suffix.
    ///
    /// Returns `None` when the remainder is empty, starts with a separator, or
    /// the token is nothing but noise.
    pub fn extract_identifier<'a>(&self, filename: &'a str) -> Option<&'a str> {
        let (rest, _) = self.strip_prefix(filename);
        let end = rest.find(SEPARATORS).unwrap_or(rest.len());
        let token = &rest[..end];
        if token.is_empty() {
            return None;
        }

        let identifier = self
            .noise_suffixes
            .iter()
            .find_map(|noise| token.strip_suffix(noise.as_str()))
            .unwrap_or(token);

        (!identifier.is_empty()).then_some(identifier)
    }

    /// Characters between the identifier and the file extension.
    ///
    /// The extension is everything after the last `.`. A stripped noise suffix
    /// stays here so that `stem == identifier + suffix`. Empty when no
    /// identifier can be extracted.
    pub fn extract_suffix<'a>(&self, filename: &'a str) -> &'a str {
        let Some(identifier) = self.extract_identifier(filename) else {
            return "";
        };
        let (rest, _) = self.strip_prefix(filename);
        let stem = rest.rsplit_once('.').map_or(rest, |(stem, _ext)| stem);
        stem.strip_prefix(identifier).unwrap_or("")
    }
}
