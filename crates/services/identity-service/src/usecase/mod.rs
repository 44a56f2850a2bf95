//! Use cases: one struct per API operation.
//!
//! Each use case checks the request context, calls the domain service and
//! projects entities into response DTOs field by field.

mod role;
mod user;
mod user_role;

pub use role::{
    CreateRole, DeleteRole, FindRole, ListRoles, PutRole, RoleDto, RoleUseCases, RolesDto,
    SearchRoles, UpdateRole,
};
pub use user::{
    CreateUser, DeleteUser, FindUser, ListUsers, PutUser, SearchUsers, UpdateUser, UserDto,
    UserUseCases, UsersDto,
};
pub use user_role::{
    AssignUserRole, GetUserPermissions, ListUserRoles, PermissionsDto, RevokeUserRole,
    UserRoleUseCases, UserRolesDto,
};
