//! Role assignment handlers, nested under `/v1/users`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use common::AppResult;

use crate::extractors::Ctx;
use crate::state::AppState;
use crate::usecase::{PermissionsDto, RoleDto, UserRolesDto};

pub fn user_role_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/roles", get(list_user_roles))
        .route(
            "/:id/roles/:role_id",
            put(assign_user_role).delete(revoke_user_role),
        )
        .route("/:id/permissions", get(get_user_permissions))
}

/// List roles held by a user
#[utoipa::path(
    get,
    path = "/v1/users/{id}/roles",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Assigned roles", body = UserRolesDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_roles(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> AppResult<Json<UserRolesDto>> {
    Ok(Json(state.user_roles.list.run(&ctx, &id).await?))
}

/// Assign a role to a user
#[utoipa::path(
    put,
    path = "/v1/users/{id}/roles/{role_id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID"),
        ("role_id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 201, description = "Role assigned", body = RoleDto),
        (status = 404, description = "User or role not found")
    )
)]
pub async fn assign_user_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path((id, role_id)): Path<(String, String)>,
) -> AppResult<(StatusCode, Json<RoleDto>)> {
    let role = state.user_roles.assign.run(&ctx, &id, &role_id).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Revoke a role from a user
#[utoipa::path(
    delete,
    path = "/v1/users/{id}/roles/{role_id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID"),
        ("role_id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 204, description = "Role revoked"),
        (status = 404, description = "User, role or assignment not found")
    )
)]
pub async fn revoke_user_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path((id, role_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.user_roles.revoke.run(&ctx, &id, &role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Effective permissions of a user
#[utoipa::path(
    get,
    path = "/v1/users/{id}/permissions",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Combined permission mask and names", body = PermissionsDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_permissions(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> AppResult<Json<PermissionsDto>> {
    Ok(Json(state.user_roles.permissions.run(&ctx, &id).await?))
}
