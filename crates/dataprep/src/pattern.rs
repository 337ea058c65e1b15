//! Glob matching for include/exclude pattern lists.
//!
//! Patterns use shell-glob semantics as implemented by `globset`: `*` and `?`
//! also cross `/`, and `**` spans any number of directories. The same rules
//! apply to file inclusion and to directory pruning.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{DataprepError, Result};

/// A compiled, ordered list of glob patterns.
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternSet {
    /// Compile every pattern. An invalid pattern is an error, not a silent skip.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| DataprepError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| DataprepError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self { patterns: patterns.to_vec(), set })
    }

    pub fn empty() -> Self {
        Self { patterns: Vec::new(), set: GlobSet::empty() }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True iff `path` matches at least one pattern.
    pub fn is_match(&self, path: &str) -> bool {
        !self.is_empty() && self.set.is_match(path)
    }

    /// True iff any of the candidate spellings of a path matches.
    pub fn is_match_any<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> bool {
        candidates.into_iter().any(|c| self.is_match(c))
    }
}

/// One-shot form of [`PatternSet::is_match`]. Patterns that fail to compile
/// never match; an empty list matches nothing.
pub fn matches(path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(path),
        Err(_) => false,
    })
}
