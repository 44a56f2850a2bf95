//! Email value objects.

use once_cell::sync::Lazy;
use regex::Regex;

use super::CustomId;
use crate::constants::{INTERNAL_EMAIL_DOMAIN, PERIOD_NONE};
use crate::error::{DomainError, DomainResult};

static EXTERNAL_EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.%+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}$")
        .expect("external email pattern is valid")
});

/// Organization-issued address, fully determined by custom id and period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalEmail(String);

impl InternalEmail {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address a member with `custom_id` enrolled in `period` must have.
    ///
    /// Period `"0"` drops the period prefix.
    pub fn derive(custom_id: &CustomId, period: &str) -> Self {
        if period == PERIOD_NONE {
            Self(format!("{}@{}", custom_id, INTERNAL_EMAIL_DOMAIN))
        } else {
            Self(format!("{}.{}@{}", period, custom_id, INTERNAL_EMAIL_DOMAIN))
        }
    }

    /// Exact, case-sensitive comparison against the derived address.
    pub fn validate(&self, custom_id: &CustomId, period: &str) -> DomainResult<()> {
        if *self == Self::derive(custom_id, period) {
            Ok(())
        } else {
            Err(DomainError::InvalidEmail)
        }
    }
}

/// Free-form contact address outside the organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEmail(String);

impl ExternalEmail {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn validate(&self) -> DomainResult<()> {
        if EXTERNAL_EMAIL_PATTERN.is_match(&self.0) {
            Ok(())
        } else {
            Err(DomainError::InvalidExternalEmail)
        }
    }
}
