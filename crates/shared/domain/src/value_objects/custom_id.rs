//! Custom identifier chosen by the member or administrator.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::CUSTOM_ID_SEPARATORS;
use crate::error::{DomainError, DomainResult};

static CUSTOM_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{1,10}$").expect("custom id pattern is valid"));

/// Human readable identifier, e.g. `stud01`.
///
/// Rule: 1-10 characters from `[a-zA-Z0-9_-]`, not starting or ending with a
/// separator, and never two separators in a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomId(String);

impl CustomId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !CUSTOM_ID_PATTERN.is_match(&self.0) {
            return Err(DomainError::InvalidCustomId);
        }

        let is_sep = |c: char| CUSTOM_ID_SEPARATORS.contains(&c);

        // pattern guarantees at least one char
        let first = self.0.chars().next().map(is_sep).unwrap_or(true);
        let last = self.0.chars().last().map(is_sep).unwrap_or(true);
        if first || last {
            return Err(DomainError::InvalidCustomId);
        }

        let doubled = self
            .0
            .chars()
            .zip(self.0.chars().skip(1))
            .any(|(a, b)| is_sep(a) && is_sep(b));
        if doubled {
            return Err(DomainError::InvalidCustomId);
        }

        Ok(())
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
