//! [`LikePattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL `ILIKE` pattern matching a substring case-insensitively.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] matching the given `needle` anywhere in
    /// the scanned text.
    #[must_use]
    pub fn contains(needle: &str) -> Self {
        Self(format!(
            "%{}%",
            needle
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::LikePattern;

    #[test]
    fn wraps_the_needle() {
        assert_eq!(LikePattern::contains("villa").to_string(), "%villa%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(
            LikePattern::contains("50%_done\\").to_string(),
            r"%50\%\_done\\%",
        );
    }
}
