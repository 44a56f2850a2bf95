//! Role service - validation and persistence of roles.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{DomainError, Page, Pagination, Role, RoleSearchParams};
use tracing::instrument;

use crate::repository::RoleRepository;

/// Role service trait for dependency injection.
#[async_trait]
pub trait RoleService: Send + Sync {
    async fn list_roles(&self, pagination: Pagination) -> AppResult<Page<Role>>;

    async fn find_role(&self, id: &str) -> AppResult<Role>;

    async fn search_roles(
        &self,
        params: &RoleSearchParams,
        pagination: Pagination,
    ) -> AppResult<Page<Role>>;

    async fn create_role(&self, role: Role) -> AppResult<()>;

    async fn edit_role(&self, role: Role) -> AppResult<()>;

    async fn update_role(&self, role: Role) -> AppResult<()>;

    /// Built-in roles are refused with `SystemRoleProtected`
    async fn delete_role(&self, id: &str) -> AppResult<()>;
}

pub struct RoleManager {
    repo: Arc<dyn RoleRepository>,
}

impl RoleManager {
    pub fn new(repo: Arc<dyn RoleRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RoleService for RoleManager {
    async fn list_roles(&self, pagination: Pagination) -> AppResult<Page<Role>> {
        self.repo.list(pagination).await
    }

    async fn find_role(&self, id: &str) -> AppResult<Role> {
        self.repo.find_by_id(id).await?.ok_or_not_found("Role")
    }

    async fn search_roles(
        &self,
        params: &RoleSearchParams,
        pagination: Pagination,
    ) -> AppResult<Page<Role>> {
        params.validate()?;
        self.repo.search(params, pagination).await
    }

    #[instrument(skip(self, role), fields(role_id = %role.id()))]
    async fn create_role(&self, role: Role) -> AppResult<()> {
        role.validate()?;
        self.repo.create(&role).await
    }

    #[instrument(skip(self, role), fields(role_id = %role.id()))]
    async fn edit_role(&self, role: Role) -> AppResult<()> {
        role.validate()?;
        self.repo.save(&role).await
    }

    #[instrument(skip(self, role), fields(role_id = %role.id()))]
    async fn update_role(&self, role: Role) -> AppResult<()> {
        role.validate()?;
        self.repo.update(&role).await
    }

    async fn delete_role(&self, id: &str) -> AppResult<()> {
        let role = self.find_role(id).await?;
        if role.is_system() {
            return Err(DomainError::SystemRoleProtected.into());
        }
        self.repo.delete(id).await
    }
}
