//! Request-scoped parameters threaded explicitly through use cases.
//!
//! `RequestContext` carries the correlation id, pagination and, for search
//! endpoints, the typed search bag. Every field of a search bag is an
//! `Option<String>`: `None` means the caller did not send it, `Some("")`
//! means the caller sent an empty value and it is matched literally.

use serde::Deserialize;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE, MAX_PAGE_LIMIT};
use crate::error::{DomainError, DomainResult};

// =============================================================================
// Pagination
// =============================================================================

/// Page window requested by the caller.
///
/// Pages are 1-based; page 0 is accepted and addresses the first page.
/// Pages past [`MAX_PAGE`] are clamped to it and come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u64,
    page: u64,
}

impl Pagination {
    pub fn new(limit: u64, page: u64) -> Self {
        let limit = match limit {
            0 => DEFAULT_PAGE_LIMIT,
            l => l.min(MAX_PAGE_LIMIT),
        };
        Self {
            limit,
            page: page.min(MAX_PAGE),
        }
    }

    /// Parse raw `limit` / `page` query values, falling back to defaults on
    /// anything that is not a non-negative integer.
    pub fn from_query(limit: Option<&str>, page: Option<&str>) -> Self {
        let limit = limit
            .and_then(|l| l.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        let page = page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAGE);
        Self::new(limit, page)
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Number of pages needed to hold `total` rows (ceiling division).
    pub fn total_pages(&self, total: u64) -> u64 {
        (total + self.limit - 1) / self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, DEFAULT_PAGE)
    }
}

/// One page of results plus the unpaged row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }
}

// =============================================================================
// Search parameters
// =============================================================================

/// Filters accepted by the user search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserSearchParams {
    pub id: Option<String>,
    pub email: Option<String>,
    pub custom_id: Option<String>,
    pub name: Option<String>,
    pub external_email: Option<String>,
    pub period: Option<String>,
    pub is_enable: Option<String>,
}

impl UserSearchParams {
    pub fn is_enable(&self) -> DomainResult<Option<bool>> {
        parse_flag("is_enable", self.is_enable.as_deref())
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.is_enable().map(|_| ())
    }
}

/// Filters accepted by the role search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoleSearchParams {
    pub id: Option<String>,
    pub custom_id: Option<String>,
    pub name: Option<String>,
    pub is_enable: Option<String>,
    pub is_system: Option<String>,
}

impl RoleSearchParams {
    pub fn is_enable(&self) -> DomainResult<Option<bool>> {
        parse_flag("is_enable", self.is_enable.as_deref())
    }

    pub fn is_system(&self) -> DomainResult<Option<bool>> {
        parse_flag("is_system", self.is_system.as_deref())
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.is_enable()?;
        self.is_system()?;
        Ok(())
    }
}

fn parse_flag(field: &str, raw: Option<&str>) -> DomainResult<Option<bool>> {
    match raw {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(DomainError::invalid_search(format!(
            "{} must be true or false, got {:?}",
            field, other
        ))),
    }
}

/// Search bag attached to a request, tagged by resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchParams {
    User(UserSearchParams),
    Role(RoleSearchParams),
}

// =============================================================================
// Request context
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub pagination: Pagination,
    pub search: Option<SearchParams>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, pagination: Pagination) -> Self {
        Self {
            request_id: request_id.into(),
            pagination,
            search: None,
        }
    }

    pub fn with_search(mut self, search: SearchParams) -> Self {
        self.search = Some(search);
        self
    }

    /// A context without a correlation id was not built by the HTTP layer.
    pub fn ensure_valid(&self) -> DomainResult<()> {
        if self.request_id.trim().is_empty() {
            return Err(DomainError::InvalidRequestContext);
        }
        Ok(())
    }

    pub fn user_search(&self) -> DomainResult<&UserSearchParams> {
        match &self.search {
            Some(SearchParams::User(params)) => Ok(params),
            Some(SearchParams::Role(_)) => {
                Err(DomainError::invalid_search("role parameters given to user search"))
            }
            None => Err(DomainError::invalid_search("no user search parameters")),
        }
    }

    pub fn role_search(&self) -> DomainResult<&RoleSearchParams> {
        match &self.search {
            Some(SearchParams::Role(params)) => Ok(params),
            Some(SearchParams::User(_)) => {
                Err(DomainError::invalid_search("user parameters given to role search"))
            }
            None => Err(DomainError::invalid_search("no role search parameters")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_falls_back_on_garbage() {
        let p = Pagination::from_query(Some("abc"), Some("-1"));
        assert_eq!(p.limit(), 100);
        assert_eq!(p.page(), 0);

        let p = Pagination::from_query(None, None);
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn test_pagination_clamps_limit() {
        assert_eq!(Pagination::from_query(Some("0"), None).limit(), 100);
        assert_eq!(Pagination::from_query(Some("500"), None).limit(), 100);
        assert_eq!(Pagination::from_query(Some("25"), Some("3")).limit(), 25);
    }

    #[test]
    fn test_pagination_page_index() {
        assert_eq!(Pagination::new(10, 0).page_index(), 0);
        assert_eq!(Pagination::new(10, 1).page_index(), 0);
        assert_eq!(Pagination::new(10, 3).page_index(), 2);
    }

    #[test]
    fn test_huge_page_is_clamped() {
        let p = Pagination::from_query(Some("100"), Some("18446744073709551615"));
        assert_eq!(p.page(), MAX_PAGE);

        let rows_skipped = p.limit().checked_mul(p.page_index());
        assert!(rows_skipped.is_some_and(|n| n <= i64::MAX as u64));
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        let p = Pagination::new(10, 1);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(1), 1);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }

    #[test]
    fn test_flag_parsing() {
        let params = UserSearchParams {
            is_enable: Some("true".to_string()),
            ..Default::default()
        };
        assert_eq!(params.is_enable(), Ok(Some(true)));

        let params = RoleSearchParams {
            is_system: Some("yes".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DomainError::InvalidSearchParams(_))
        ));
    }

    #[test]
    fn test_context_requires_request_id() {
        let ctx = RequestContext::new("", Pagination::default());
        assert_eq!(ctx.ensure_valid(), Err(DomainError::InvalidRequestContext));
        assert!(RequestContext::new("req-1", Pagination::default())
            .ensure_valid()
            .is_ok());
    }

    #[test]
    fn test_search_bag_kind_is_checked() {
        let ctx = RequestContext::new("req-1", Pagination::default())
            .with_search(SearchParams::Role(RoleSearchParams::default()));

        assert!(ctx.role_search().is_ok());
        assert!(matches!(
            ctx.user_search(),
            Err(DomainError::InvalidSearchParams(_))
        ));
        assert!(matches!(
            RequestContext::default().role_search(),
            Err(DomainError::InvalidSearchParams(_))
        ));
    }
}
