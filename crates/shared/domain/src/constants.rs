//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Identifiers
// =============================================================================

/// Maximum length of a custom identifier
pub const MAX_CUSTOM_ID_LENGTH: usize = 10;

/// Separator characters allowed inside a custom identifier
pub const CUSTOM_ID_SEPARATORS: &[char] = &['-', '_'];

// =============================================================================
// Emails
// =============================================================================

/// Domain every internal (organization issued) email lives under
pub const INTERNAL_EMAIL_DOMAIN: &str = "uniproject.jp";

/// Period tag for members without an enrollment period prefix
pub const PERIOD_NONE: &str = "0";

// =============================================================================
// Roles
// =============================================================================

/// Minimum role name length (in characters)
pub const MIN_ROLE_NAME_LENGTH: usize = 1;

/// Maximum role name length (in characters)
pub const MAX_ROLE_NAME_LENGTH: usize = 50;

// =============================================================================
// Pagination
// =============================================================================

/// Page size used when `limit` is missing or unparsable
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Page number used when `page` is missing or unparsable
pub const DEFAULT_PAGE: u64 = 0;

/// Highest page number honoured; keeps `limit * page_index` within a SQL `BIGINT`
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_LIMIT;
