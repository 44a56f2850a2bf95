//! Role assignments and the effective permission mask of a user.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::Role;
use tracing::instrument;

use crate::repository::{RoleRepository, UserRepository};

#[async_trait]
pub trait UserRoleService: Send + Sync {
    /// Roles held by an existing user, ordered by role id
    async fn user_roles(&self, user_id: &str) -> AppResult<Vec<Role>>;

    /// Grant a role; granting one already held is a no-op
    async fn assign_role(&self, user_id: &str, role_id: &str) -> AppResult<Role>;

    async fn revoke_role(&self, user_id: &str, role_id: &str) -> AppResult<()>;

    /// OR of the masks of every held role
    async fn user_permissions(&self, user_id: &str) -> AppResult<u32>;
}

pub struct UserRoleManager {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserRoleManager {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    async fn ensure_user(&self, user_id: &str) -> AppResult<()> {
        self.users.find_by_id(user_id).await?.ok_or_not_found("User")?;
        Ok(())
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Role> {
        self.roles.find_by_id(role_id).await?.ok_or_not_found("Role")
    }
}

#[async_trait]
impl UserRoleService for UserRoleManager {
    async fn user_roles(&self, user_id: &str) -> AppResult<Vec<Role>> {
        self.ensure_user(user_id).await?;
        self.roles.find_by_user(user_id).await
    }

    #[instrument(skip(self))]
    async fn assign_role(&self, user_id: &str, role_id: &str) -> AppResult<Role> {
        self.ensure_user(user_id).await?;
        let role = self.find_role(role_id).await?;
        self.roles.assign_to_user(user_id, role_id).await?;
        Ok(role)
    }

    #[instrument(skip(self))]
    async fn revoke_role(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        self.ensure_user(user_id).await?;
        self.find_role(role_id).await?;
        self.roles.revoke_from_user(user_id, role_id).await
    }

    async fn user_permissions(&self, user_id: &str) -> AppResult<u32> {
        let roles = self.user_roles(user_id).await?;
        Ok(roles.iter().fold(0, |acc, role| acc | role.permission_bits()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockRoleRepository, MockUserRepository};
    use domain::{DomainError, NewRole, NewUser, PermissionSet, User};
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn existing_user() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().with(eq("u-1")).returning(|_| {
            Ok(Some(User::new(NewUser {
                id: "u-1".to_string(),
                custom_id: "stud01".to_string(),
                ..Default::default()
            })))
        });
        users
    }

    fn missing_user() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        users
    }

    fn role(id: &str, bits: u32) -> Role {
        Role::new(NewRole {
            id: id.to_string(),
            custom_id: format!("role-{}", id),
            name: "Role".to_string(),
            permissions: PermissionSet::from_bits(bits),
            is_enable: true,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_permissions_combine_every_held_role() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_user()
            .with(eq("u-1"))
            .returning(|_| Ok(vec![role("r-1", 0b0011), role("r-2", 0b0110 | 1 << 31)]));

        let service = UserRoleManager::new(Arc::new(existing_user()), Arc::new(roles));
        let bits = assert_ok!(service.user_permissions("u-1").await);

        assert_eq!(bits, 0b0111 | 1 << 31);
    }

    #[tokio::test]
    async fn test_user_without_roles_has_no_permissions() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_user().returning(|_| Ok(vec![]));

        let service = UserRoleManager::new(Arc::new(existing_user()), Arc::new(roles));

        assert_eq!(assert_ok!(service.user_permissions("u-1").await), 0);
    }

    #[tokio::test]
    async fn test_roles_of_missing_user_are_not_found() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_user().never();

        let service = UserRoleManager::new(Arc::new(missing_user()), Arc::new(roles));
        let err = assert_err!(service.user_roles("ghost").await);

        assert_eq!(err.domain(), Some(&DomainError::NotFound("User".to_string())));
    }

    #[tokio::test]
    async fn test_assign_returns_the_role() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .with(eq("r-1"))
            .returning(|_| Ok(Some(role("r-1", 1))));
        roles
            .expect_assign_to_user()
            .with(eq("u-1"), eq("r-1"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserRoleManager::new(Arc::new(existing_user()), Arc::new(roles));
        let assigned = assert_ok!(service.assign_role("u-1", "r-1").await);

        assert_eq!(assigned.id(), "r-1");
    }

    #[tokio::test]
    async fn test_assign_unknown_role_is_not_found() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(None));
        roles.expect_assign_to_user().never();

        let service = UserRoleManager::new(Arc::new(existing_user()), Arc::new(roles));
        let err = assert_err!(service.assign_role("u-1", "nope").await);

        assert_eq!(err.domain(), Some(&DomainError::NotFound("Role".to_string())));
    }

    #[tokio::test]
    async fn test_revoke_passes_missing_assignment_through() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(Some(role("r-1", 1))));
        roles
            .expect_revoke_from_user()
            .returning(|_, _| Err(DomainError::NotFound("Role assignment".to_string()).into()));

        let service = UserRoleManager::new(Arc::new(existing_user()), Arc::new(roles));
        let err = assert_err!(service.revoke_role("u-1", "r-1").await);

        assert_eq!(
            err.domain(),
            Some(&DomainError::NotFound("Role assignment".to_string()))
        );
    }
}
