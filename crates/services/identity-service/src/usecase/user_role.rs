//! Role assignment use cases.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use common::AppResult;
use domain::{Permission, RequestContext};

use super::RoleDto;
use crate::service::UserRoleService;

/// Roles currently held by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRolesDto {
    #[serde(rename = "data")]
    pub roles: Vec<RoleDto>,
}

/// Effective permissions of a user. Bits without a known name are listed as `PERMISSION_<i>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionsDto {
    #[schema(example = 16777217)]
    pub permissions_bit: u32,
    #[schema(example = json!(["USER_READ", "ROLE_MANAGE"]))]
    pub permissions_text: Vec<String>,
}

impl From<u32> for PermissionsDto {
    fn from(bits: u32) -> Self {
        Self {
            permissions_bit: bits,
            permissions_text: Permission::describe(bits),
        }
    }
}

pub struct ListUserRoles {
    service: Arc<dyn UserRoleService>,
}

impl ListUserRoles {
    pub fn new(service: Arc<dyn UserRoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, user_id: &str) -> AppResult<UserRolesDto> {
        ctx.ensure_valid()?;
        let roles = self.service.user_roles(user_id).await?;

        info!(request_id = %ctx.request_id, user_id = %user_id, total = roles.len(), "listed user roles");
        Ok(UserRolesDto {
            roles: roles.iter().map(RoleDto::from).collect(),
        })
    }
}

pub struct AssignUserRole {
    service: Arc<dyn UserRoleService>,
}

impl AssignUserRole {
    pub fn new(service: Arc<dyn UserRoleService>) -> Self {
        Self { service }
    }

    pub async fn run(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<RoleDto> {
        ctx.ensure_valid()?;
        let role = self.service.assign_role(user_id, role_id).await?;

        info!(request_id = %ctx.request_id, user_id = %user_id, role_id = %role_id, "assigned role");
        Ok(RoleDto::from(&role))
    }
}

pub struct RevokeUserRole {
    service: Arc<dyn UserRoleService>,
}

impl RevokeUserRole {
    pub fn new(service: Arc<dyn UserRoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, user_id: &str, role_id: &str) -> AppResult<()> {
        ctx.ensure_valid()?;
        self.service.revoke_role(user_id, role_id).await?;

        info!(request_id = %ctx.request_id, user_id = %user_id, role_id = %role_id, "revoked role");
        Ok(())
    }
}

pub struct GetUserPermissions {
    service: Arc<dyn UserRoleService>,
}

impl GetUserPermissions {
    pub fn new(service: Arc<dyn UserRoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, user_id: &str) -> AppResult<PermissionsDto> {
        ctx.ensure_valid()?;
        let bits = self.service.user_permissions(user_id).await?;

        info!(request_id = %ctx.request_id, user_id = %user_id, bits, "resolved permissions");
        Ok(PermissionsDto::from(bits))
    }
}

pub struct UserRoleUseCases {
    pub list: ListUserRoles,
    pub assign: AssignUserRole,
    pub revoke: RevokeUserRole,
    pub permissions: GetUserPermissions,
}

impl UserRoleUseCases {
    pub fn new(service: Arc<dyn UserRoleService>) -> Self {
        Self {
            list: ListUserRoles::new(service.clone()),
            assign: AssignUserRole::new(service.clone()),
            revoke: RevokeUserRole::new(service.clone()),
            permissions: GetUserPermissions::new(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockRoleRepository, MockUserRepository};
    use crate::service::UserRoleManager;
    use domain::{NewRole, NewUser, Pagination, PermissionSet, Role, User};
    use tokio_test::assert_ok;

    fn use_cases(roles: MockRoleRepository) -> UserRoleUseCases {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|id| {
            Ok(Some(User::new(NewUser {
                id: id.to_string(),
                ..Default::default()
            })))
        });
        UserRoleUseCases::new(Arc::new(UserRoleManager::new(
            Arc::new(users),
            Arc::new(roles),
        )))
    }

    fn role_with_bits(bits: u32) -> Role {
        Role::new(NewRole {
            id: "r-1".to_string(),
            custom_id: "legacy".to_string(),
            name: "Legacy".to_string(),
            permissions: PermissionSet::from_bits(bits),
            is_enable: true,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_permissions_name_known_and_unknown_bits() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_user()
            .returning(|_| Ok(vec![role_with_bits(1 | 1 << 24 | 1 << 30)]));

        let ctx = RequestContext::new("req-1", Pagination::default());
        let dto = assert_ok!(use_cases(roles).permissions.run(&ctx, "u-1").await);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["permissions_bit"], 1 | 1 << 24 | 1 << 30);
        assert_eq!(
            json["permissions_text"],
            serde_json::json!(["USER_READ", "ROLE_MANAGE", "PERMISSION_30"])
        );
    }

    #[tokio::test]
    async fn test_user_roles_serialize_under_data_key() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_user()
            .returning(|_| Ok(vec![role_with_bits(1)]));

        let ctx = RequestContext::new("req-1", Pagination::default());
        let dto = assert_ok!(use_cases(roles).list.run(&ctx, "u-1").await);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["data"][0]["id"], "r-1");
        assert_eq!(json["data"][0]["permission"], 1);
    }
}
