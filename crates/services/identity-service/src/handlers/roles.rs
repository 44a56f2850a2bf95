//! Role handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{NewRole, PermissionSet, Role, RoleSearchParams, SearchParams};

use super::{id_or_new, required_id, StatusResponse};
use crate::extractors::{Ctx, SearchQuery, ValidatedJson};
use crate::state::AppState;
use crate::usecase::{RoleDto, RolesDto};

/// Role body for create, replace and patch.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RoleRequest {
    pub id: String,
    #[schema(example = "staff")]
    pub custom_id: String,
    #[schema(example = "Staff")]
    pub name: String,
    /// Permission names, e.g. `USER_READ`
    #[schema(example = json!(["USER_READ", "ROLE_MANAGE"]))]
    #[validate(length(max = 32, message = "Too many permissions"))]
    pub permission: Vec<String>,
    pub is_enable: bool,
}

impl RoleRequest {
    /// Roles created over the API are never system roles.
    fn into_role(self, id: String) -> Role {
        Role::new(NewRole {
            id,
            custom_id: self.custom_id,
            name: self.name,
            permissions: PermissionSet::new(self.permission),
            is_enable: self.is_enable,
            is_system: false,
            created_at: None,
            updated_at: None,
        })
    }
}

/// Create role routes
pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_roles)
                .post(create_role)
                .put(replace_role)
                .patch(update_role),
        )
        .route("/search", get(search_roles))
        .route("/:id", get(get_role).delete(delete_role))
}

/// List roles
#[utoipa::path(
    get,
    path = "/v1/roles",
    tag = "Roles",
    params(
        ("limit" = Option<String>, Query, description = "Page size (default 100)"),
        ("page" = Option<String>, Query, description = "Page number, 1-based")
    ),
    responses(
        (status = 200, description = "One page of roles", body = RolesDto)
    )
)]
pub async fn list_roles(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
) -> AppResult<Json<RolesDto>> {
    Ok(Json(state.roles.list.run(&ctx).await?))
}

/// Search roles by exact field values
#[utoipa::path(
    get,
    path = "/v1/roles/search",
    tag = "Roles",
    params(
        ("id" = Option<String>, Query, description = "Role ID"),
        ("custom_id" = Option<String>, Query, description = "Custom ID"),
        ("name" = Option<String>, Query, description = "Display name"),
        ("is_enable" = Option<String>, Query, description = "true or false"),
        ("is_system" = Option<String>, Query, description = "true or false"),
        ("limit" = Option<String>, Query, description = "Page size"),
        ("page" = Option<String>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Matching roles", body = RolesDto),
        (status = 400, description = "Malformed search parameters")
    )
)]
pub async fn search_roles(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    SearchQuery(params): SearchQuery<RoleSearchParams>,
) -> AppResult<Json<RolesDto>> {
    let ctx = ctx.with_search(SearchParams::Role(params));
    Ok(Json(state.roles.search.run(&ctx).await?))
}

/// Get role by ID
#[utoipa::path(
    get,
    path = "/v1/roles/{id}",
    tag = "Roles",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role", body = RoleDto),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> AppResult<Json<RoleDto>> {
    Ok(Json(state.roles.find.run(&ctx, &id).await?))
}

/// Create role
#[utoipa::path(
    post,
    path = "/v1/roles",
    tag = "Roles",
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role created", body = StatusResponse),
        (status = 400, description = "Field does not match the required pattern"),
        (status = 409, description = "Resource already exists")
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(payload): ValidatedJson<RoleRequest>,
) -> AppResult<Json<StatusResponse>> {
    let id = id_or_new(payload.id.clone());

    state.roles.create.run(&ctx, payload.into_role(id)).await?;
    Ok(Json(StatusResponse::success()))
}

/// Replace role
#[utoipa::path(
    put,
    path = "/v1/roles",
    tag = "Roles",
    request_body = RoleRequest,
    responses(
        (status = 204, description = "Role replaced"),
        (status = 400, description = "Field does not match the required pattern"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn replace_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(payload): ValidatedJson<RoleRequest>,
) -> AppResult<StatusCode> {
    let id = required_id(payload.id.clone())?;

    state.roles.put.run(&ctx, payload.into_role(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Patch role
#[utoipa::path(
    patch,
    path = "/v1/roles",
    tag = "Roles",
    request_body = RoleRequest,
    responses(
        (status = 204, description = "Role updated"),
        (status = 400, description = "Field does not match the required pattern"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(payload): ValidatedJson<RoleRequest>,
) -> AppResult<StatusCode> {
    let id = required_id(payload.id.clone())?;

    state.roles.update.run(&ctx, payload.into_role(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete role
#[utoipa::path(
    delete,
    path = "/v1/roles/{id}",
    tag = "Roles",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "System roles cannot be deleted"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.roles.delete.run(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_role_is_never_system() {
        let request = RoleRequest {
            custom_id: "staff".to_string(),
            name: "Staff".to_string(),
            permission: vec!["USER_READ".to_string(), "APP_READ".to_string()],
            is_enable: true,
            ..Default::default()
        };

        let role = request.into_role("r-1".to_string());
        assert!(!role.is_system());
        assert!(role.validate().is_ok());
        assert_eq!(role.permissions().names(), ["USER_READ", "APP_READ"]);
    }

    #[test]
    fn test_unknown_permission_fails_validation() {
        let request = RoleRequest {
            custom_id: "staff".to_string(),
            name: "Staff".to_string(),
            permission: vec!["ROOT".to_string()],
            ..Default::default()
        };

        assert!(request.into_role("r-1".to_string()).validate().is_err());
    }
}
