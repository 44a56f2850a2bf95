//! Builds the per-request context from headers and query string.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};

use common::AppError;
use domain::{Pagination, RequestContext};

/// Header carrying the correlation id, set by the request-id middleware.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    limit: Option<String>,
    page: Option<String>,
}

/// Request id plus pagination. Search endpoints attach their bag separately.
pub struct Ctx(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // a blank or non-ASCII id from the client is replaced, not rejected
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        // bad paging input falls back to defaults instead of failing
        let query = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or_default();

        let pagination = Pagination::from_query(query.limit.as_deref(), query.page.as_deref());
        Ok(Ctx(RequestContext::new(request_id, pagination)))
    }
}

/// Typed search parameters taken from the query string.
pub struct SearchQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SearchQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        Ok(SearchQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};
    use domain::constants::MAX_PAGE;

    async fn ctx_for(uri: &str, request_id: Option<HeaderValue>) -> RequestContext {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        let Ctx(ctx) = Ctx::from_request_parts(&mut parts, &()).await.unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let ctx = ctx_for("/", Some(HeaderValue::from_static("req-42"))).await;
        assert_eq!(ctx.request_id, "req-42");
    }

    #[tokio::test]
    async fn test_unusable_request_id_is_replaced() {
        for value in [
            HeaderValue::from_static(""),
            HeaderValue::from_static("   "),
            HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        ] {
            let ctx = ctx_for("/", Some(value)).await;
            assert!(ctx.ensure_valid().is_ok());
        }

        assert!(ctx_for("/", None).await.ensure_valid().is_ok());
    }

    #[tokio::test]
    async fn test_paging_query_is_parsed() {
        let ctx = ctx_for("/?limit=25&page=3", None).await;
        assert_eq!(ctx.pagination, Pagination::new(25, 3));

        let ctx = ctx_for("/?limit=100&page=18446744073709551615", None).await;
        assert_eq!(ctx.pagination.page(), MAX_PAGE);
    }
}
