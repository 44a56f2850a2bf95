//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health::HealthResponse;
use crate::handlers::roles::RoleRequest;
use crate::handlers::users::UserRequest;
use crate::handlers::StatusResponse;
use crate::usecase::{PermissionsDto, RoleDto, RolesDto, UserDto, UserRolesDto, UsersDto};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(title = "Identity Service", description = "Users and roles administration API"),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::list_users,
        crate::handlers::users::search_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::replace_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::user_roles::list_user_roles,
        crate::handlers::user_roles::assign_user_role,
        crate::handlers::user_roles::revoke_user_role,
        crate::handlers::user_roles::get_user_permissions,
        crate::handlers::roles::list_roles,
        crate::handlers::roles::search_roles,
        crate::handlers::roles::get_role,
        crate::handlers::roles::create_role,
        crate::handlers::roles::replace_role,
        crate::handlers::roles::update_role,
        crate::handlers::roles::delete_role,
    ),
    components(
        schemas(
            UserRequest,
            RoleRequest,
            UserDto,
            UsersDto,
            RoleDto,
            RolesDto,
            UserRolesDto,
            PermissionsDto,
            StatusResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Roles", description = "Role management endpoints"),
        (name = "Health", description = "Liveness and database checks"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/v1/health",
            "/v1/users",
            "/v1/users/search",
            "/v1/users/{id}",
            "/v1/users/{id}/roles",
            "/v1/users/{id}/roles/{role_id}",
            "/v1/users/{id}/permissions",
            "/v1/roles",
            "/v1/roles/search",
            "/v1/roles/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
