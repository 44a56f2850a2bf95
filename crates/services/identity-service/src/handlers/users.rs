//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{NewUser, SearchParams, User, UserSearchParams};

use super::{id_or_new, required_id, StatusResponse};
use crate::extractors::{Ctx, SearchQuery, ValidatedJson};
use crate::state::AppState;
use crate::usecase::{UserDto, UsersDto};

/// User body for create, replace and patch.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    /// Generated when empty on create
    pub id: String,
    #[schema(example = "stud01@uniproject.jp")]
    pub email: String,
    #[schema(example = "stud01")]
    pub custom_id: String,
    #[validate(length(max = 255, message = "Name is too long"))]
    pub name: String,
    #[schema(example = "real@example.com")]
    pub external_email: String,
    #[schema(example = "0")]
    pub period: String,
    pub is_enable: bool,
    #[validate(length(max = 255, message = "PasswordHash is too long"))]
    pub password_hash: Option<String>,
    /// RFC 3339 timestamp
    #[schema(example = "2024-04-01T00:00:00Z")]
    pub joined_at: Option<String>,
}

impl UserRequest {
    fn into_user(self, id: String) -> AppResult<User> {
        let joined_at = match self.joined_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|_| AppError::bad_request("joined_at must be an RFC 3339 timestamp"))?
                    .with_timezone(&Utc),
            ),
        };

        Ok(User::new(NewUser {
            id,
            email: self.email,
            custom_id: self.custom_id,
            name: self.name,
            external_email: self.external_email,
            period: self.period,
            is_enable: self.is_enable,
            password_hash: self.password_hash.filter(|h| !h.is_empty()),
            created_at: None,
            updated_at: None,
            joined_at,
        }))
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(replace_user)
                .patch(update_user),
        )
        .route("/search", get(search_users))
        .route("/:id", get(get_user).delete(delete_user))
}

/// List users
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    params(
        ("limit" = Option<String>, Query, description = "Page size (default 100)"),
        ("page" = Option<String>, Query, description = "Page number, 1-based")
    ),
    responses(
        (status = 200, description = "One page of users", body = UsersDto)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
) -> AppResult<Json<UsersDto>> {
    Ok(Json(state.users.list.run(&ctx).await?))
}

/// Search users by exact field values
#[utoipa::path(
    get,
    path = "/v1/users/search",
    tag = "Users",
    params(
        ("id" = Option<String>, Query, description = "User ID"),
        ("email" = Option<String>, Query, description = "Internal email"),
        ("custom_id" = Option<String>, Query, description = "Custom ID"),
        ("name" = Option<String>, Query, description = "Display name"),
        ("external_email" = Option<String>, Query, description = "External email"),
        ("period" = Option<String>, Query, description = "Enrollment period"),
        ("is_enable" = Option<String>, Query, description = "true or false"),
        ("limit" = Option<String>, Query, description = "Page size"),
        ("page" = Option<String>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Matching users", body = UsersDto),
        (status = 400, description = "Malformed search parameters")
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    SearchQuery(params): SearchQuery<UserSearchParams>,
) -> AppResult<Json<UsersDto>> {
    let ctx = ctx.with_search(SearchParams::User(params));
    Ok(Json(state.users.search.run(&ctx).await?))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> AppResult<Json<UserDto>> {
    Ok(Json(state.users.find.run(&ctx, &id).await?))
}

/// Create user
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = StatusResponse),
        (status = 400, description = "Field does not match the required pattern"),
        (status = 409, description = "Resource already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<StatusResponse>> {
    let id = id_or_new(payload.id.clone());
    let user = payload.into_user(id)?;

    state.users.create.run(&ctx, user).await?;
    Ok(Json(StatusResponse::success()))
}

/// Replace user
#[utoipa::path(
    put,
    path = "/v1/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 204, description = "User replaced"),
        (status = 400, description = "Field does not match the required pattern"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Resource already exists")
    )
)]
pub async fn replace_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<StatusCode> {
    let id = required_id(payload.id.clone())?;
    let user = payload.into_user(id)?;

    state.users.put.run(&ctx, user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Patch user
#[utoipa::path(
    patch,
    path = "/v1/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Field does not match the required pattern"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<StatusCode> {
    let id = required_id(payload.id.clone())?;
    let user = payload.into_user(id)?;

    state.users.update.run(&ctx, user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.users.delete.run(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
