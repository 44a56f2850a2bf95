//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "identity-service")]
    pub service: String,
    /// `up`, `down` or `not_configured`
    pub database: String,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies database connectivity.
#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::error!(error = %e, "database ping failed");
                "down"
            }
        },
        None => "not_configured",
    };

    let healthy = database != "down";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        service: state.config.service.service_name.clone(),
        database: database.to_string(),
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use serde_json::{json, Value};

    use crate::config::IdentityServiceConfig;
    use crate::infra::Database;
    use crate::repository::{MockRoleRepository, MockUserRepository};

    fn state() -> AppState {
        AppState::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockRoleRepository::new()),
            IdentityServiceConfig::default(),
        )
    }

    async fn body_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unreachable_database_is_degraded_without_details() {
        let state = state().with_database(Database::disconnected());

        let (status, body) = body_of(health_check(State(state)).await).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            json!({"status": "degraded", "service": "identity-service", "database": "down"})
        );
    }

    #[tokio::test]
    async fn test_missing_database_is_healthy() {
        let (status, body) = body_of(health_check(State(state())).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "not_configured");
    }
}
