use regex::{Regex, RegexBuilder};

use crate::domain::error::SearchError;

// Upper bound on compiled program size for caller-supplied patterns.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A compiled search pattern. Matching is unanchored, like a substring search.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, SearchError> {
        let regex = RegexBuilder::new(source)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_anywhere_in_text() {
        let pattern = Pattern::compile("TerbiumLabsChallenge_[0-9]+").unwrap();
        assert!(pattern.is_match("flag: TerbiumLabsChallenge_42\n"));
        assert!(!pattern.is_match("TerbiumLabsChallenge_"));
    }

    #[test]
    fn invalid_pattern_fails_fast() {
        let err = Pattern::compile("[unclosed").unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
    }

    #[test]
    fn is_case_sensitive() {
        let pattern = Pattern::compile("abc").unwrap();
        assert!(!pattern.is_match("ABC"));
    }
}
