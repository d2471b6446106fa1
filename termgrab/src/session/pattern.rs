//! Patterns and terminator sets for blocking reads.
//!
//! Prompt strings such as `router1(config)#` are full of regex
//! metacharacters, so literal matching is the default and uses a
//! precompiled `memchr::memmem` finder. Regex patterns are available for
//! embedders that need them (banner lines, variable prompts).

use std::fmt;

use memchr::memmem::Finder;
use regex::bytes::Regex;

use crate::error::SessionError;

/// A compiled pattern the session layer can wait for.
#[derive(Clone)]
pub struct Pattern {
    kind: PatternKind,
}

#[derive(Clone)]
enum PatternKind {
    Literal {
        needle: Vec<u8>,
        finder: Finder<'static>,
    },
    Regex(Regex),
}

impl Pattern {
    /// Compile a literal byte pattern.
    pub fn literal(needle: impl AsRef<[u8]>) -> Self {
        let needle = needle.as_ref().to_vec();
        let finder = Finder::new(&needle).into_owned();
        Self {
            kind: PatternKind::Literal { needle, finder },
        }
    }

    /// Compile a regex pattern.
    pub fn regex(pattern: &str) -> Result<Self, SessionError> {
        Ok(Self {
            kind: PatternKind::Regex(Regex::new(pattern)?),
        })
    }

    /// Find the first occurrence in `haystack`.
    ///
    /// Returns the byte range of the match.
    pub fn find(&self, haystack: &[u8]) -> Option<(usize, usize)> {
        match &self.kind {
            PatternKind::Literal { needle, finder } => finder
                .find(haystack)
                .map(|start| (start, start + needle.len())),
            PatternKind::Regex(re) => re.find(haystack).map(|m| (m.start(), m.end())),
        }
    }

    /// Check whether the pattern occurs in `haystack`.
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.find(haystack).is_some()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Literal { needle, .. } => f
                .debug_tuple("Pattern::Literal")
                .field(&String::from_utf8_lossy(needle))
                .finish(),
            PatternKind::Regex(re) => f.debug_tuple("Pattern::Regex").field(&re.as_str()).finish(),
        }
    }
}

/// An ordered set of patterns watched simultaneously by a blocking read.
///
/// Order matters: the read reports WHICH member matched, and callers key
/// their control flow off that index. When two members match at the same
/// byte offset, the earlier member in the set wins.
#[derive(Debug, Clone)]
pub struct TerminatorSet {
    patterns: Vec<Pattern>,
}

/// A match found by [`TerminatorSet::first_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminatorMatch {
    /// Index of the matched member in the set.
    pub index: usize,

    /// Byte offset where the match begins.
    pub start: usize,

    /// Byte offset one past the end of the match.
    pub end: usize,
}

impl TerminatorSet {
    /// Create a terminator set from ordered patterns.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Create a single-member set.
    pub fn single(pattern: Pattern) -> Self {
        Self {
            patterns: vec![pattern],
        }
    }

    /// Find the match that occurs earliest in `haystack`.
    ///
    /// A member matching at a lower byte offset wins regardless of its set
    /// position; ties are broken by set order. This is what lets a capture
    /// loop tell "ordinary line" apart from "trailing prompt" when both are
    /// somewhere in the buffered stream.
    pub fn first_match(&self, haystack: &[u8]) -> Option<TerminatorMatch> {
        let mut best: Option<TerminatorMatch> = None;

        for (index, pattern) in self.patterns.iter().enumerate() {
            if let Some((start, end)) = pattern.find(haystack) {
                let candidate = TerminatorMatch { index, start, end };
                match best {
                    Some(b) if b.start <= start => {}
                    _ => best = Some(candidate),
                }
            }
        }

        best
    }

    /// Number of members in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_find() {
        let pattern = Pattern::literal("router1#");
        assert_eq!(pattern.find(b"output\r\nrouter1#"), Some((8, 16)));
        assert!(pattern.find(b"router1>").is_none());
    }

    #[test]
    fn test_literal_metacharacters() {
        // Prompt text must never be treated as regex syntax
        let pattern = Pattern::literal("sw1(config)#");
        assert!(pattern.is_match(b"sw1(config)#"));
        assert!(!pattern.is_match(b"sw1config#"));
    }

    #[test]
    fn test_regex_find() {
        let pattern = Pattern::regex(r"[Pp]assword:").unwrap();
        assert_eq!(pattern.find(b"Password: "), Some((0, 9)));
        assert!(Pattern::regex(r"[").is_err());
    }

    #[test]
    fn test_first_match_picks_earliest() {
        let set = TerminatorSet::new(vec![
            Pattern::literal("\r\n"),
            Pattern::literal("router1#"),
        ]);

        // Line ending occurs before the prompt, so member 0 wins
        let m = set.first_match(b"line one\r\nrouter1#").unwrap();
        assert_eq!(m.index, 0);
        assert_eq!((m.start, m.end), (8, 10));

        // Only the prompt remains
        let m = set.first_match(b"router1#").unwrap();
        assert_eq!(m.index, 1);
    }

    #[test]
    fn test_first_match_tie_breaks_by_order() {
        let set = TerminatorSet::new(vec![Pattern::literal("ab"), Pattern::literal("abc")]);
        let m = set.first_match(b"abc").unwrap();
        assert_eq!(m.index, 0);
    }

    #[test]
    fn test_no_match() {
        let set = TerminatorSet::single(Pattern::literal("#"));
        assert!(set.first_match(b"still going").is_none());
    }
}
