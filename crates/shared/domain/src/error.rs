//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
///
/// Callers at the HTTP boundary match on the variant, so validation kinds
/// must never be folded into a generic message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Custom identifier failed its pattern rule
    #[error("CustomID does not match the required pattern")]
    InvalidCustomId,

    /// Internal email is not the one derived from custom id and period
    #[error("Email does not match the required pattern")]
    InvalidEmail,

    /// External email is not a plausible address
    #[error("ExternalEmail does not match the required pattern")]
    InvalidExternalEmail,

    /// Role display name failed its length or character rule
    #[error("Name does not match the required pattern")]
    InvalidRoleName(String),

    /// Unknown permission name
    #[error("Permission does not match the required pattern: {0}")]
    InvalidPermission(String),

    /// Entity not found
    #[error("{0} Not Found")]
    NotFound(String),

    /// Unique key collision reported by the store
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Built-in roles may not be removed
    #[error("System roles cannot be deleted")]
    SystemRoleProtected,

    /// Per-request context was missing or malformed
    #[error("Invalid request context")]
    InvalidRequestContext,

    /// Search was requested without usable search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidSearchParams(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a duplicate entry error
    pub fn duplicate(detail: impl Into<String>) -> Self {
        DomainError::DuplicateEntry(detail.into())
    }

    /// Create a search parameter error
    pub fn invalid_search(msg: impl Into<String>) -> Self {
        DomainError::InvalidSearchParams(msg.into())
    }

    /// True for the field-pattern failures raised by entity validation.
    pub fn is_pattern_mismatch(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCustomId
                | DomainError::InvalidEmail
                | DomainError::InvalidExternalEmail
                | DomainError::InvalidRoleName(_)
                | DomainError::InvalidPermission(_)
        )
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
