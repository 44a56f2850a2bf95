//! Route configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health_routes, role_routes, user_role_routes, user_routes};
use crate::middleware::apply_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .nest("/v1/health", health_routes())
        .nest("/v1/users", user_routes().merge(user_role_routes()))
        .nest("/v1/roles", role_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    apply_middleware(router, &config)
}
