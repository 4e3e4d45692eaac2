//! Site prefix stripping.

use super::FilenameRules;

impl FilenameRules {
    /// Strips the first matching site prefix.
    ///
    /// Prefixes are tested in declaration order; at most one is removed.
    /// Without a match the filename is returned unchanged.
    pub fn strip_prefix<'a>(&self, filename: &'a str) -> (&'a str, Option<&'a str>) {
        for prefix in &self.site_prefixes {
            if let Some(rest) = filename.strip_prefix(prefix.as_str()) {
                return (rest, Some(&filename[..prefix.len()]));
            }
        }
        (filename, None)
    }
}
