//! Role use cases.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use common::AppResult;
use domain::{Page, RequestContext, Role};

use crate::service::RoleService;

/// Role as returned to clients; permissions are exposed as the raw mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: String,
    #[schema(example = "staff")]
    pub custom_id: String,
    #[schema(example = "Staff")]
    pub name: String,
    #[schema(example = 16777217)]
    pub permission: u32,
    pub is_enable: bool,
    pub is_system: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id().to_string(),
            custom_id: role.custom_id().to_string(),
            name: role.name().to_string(),
            permission: role.permission_bits(),
            is_enable: role.is_enable(),
            is_system: role.is_system(),
            created_at: role.created_at(),
            updated_at: role.updated_at(),
        }
    }
}

/// Paged role listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RolesDto {
    pub total_count: u64,
    pub pages: u64,
    #[serde(rename = "data")]
    pub roles: Vec<RoleDto>,
}

impl RolesDto {
    fn from_page(page: &Page<Role>, ctx: &RequestContext) -> Self {
        Self {
            total_count: page.total_count,
            pages: ctx.pagination.total_pages(page.total_count),
            roles: page.items.iter().map(RoleDto::from).collect(),
        }
    }
}

// =============================================================================
// Use cases
// =============================================================================

pub struct ListRoles {
    service: Arc<dyn RoleService>,
}

impl ListRoles {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext) -> AppResult<RolesDto> {
        ctx.ensure_valid()?;
        let page = self.service.list_roles(ctx.pagination).await?;

        info!(request_id = %ctx.request_id, total = page.total_count, "listed roles");
        Ok(RolesDto::from_page(&page, ctx))
    }
}

pub struct FindRole {
    service: Arc<dyn RoleService>,
}

impl FindRole {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, id: &str) -> AppResult<RoleDto> {
        ctx.ensure_valid()?;
        let role = self.service.find_role(id).await?;

        info!(request_id = %ctx.request_id, role_id = %id, "found role");
        Ok(RoleDto::from(&role))
    }
}

pub struct SearchRoles {
    service: Arc<dyn RoleService>,
}

impl SearchRoles {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext) -> AppResult<RolesDto> {
        ctx.ensure_valid()?;
        let params = ctx.role_search()?;
        let page = self.service.search_roles(params, ctx.pagination).await?;

        info!(request_id = %ctx.request_id, total = page.total_count, "searched roles");
        Ok(RolesDto::from_page(&page, ctx))
    }
}

pub struct CreateRole {
    service: Arc<dyn RoleService>,
}

impl CreateRole {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, role: Role) -> AppResult<()> {
        ctx.ensure_valid()?;
        let id = role.id().to_string();
        self.service.create_role(role).await?;

        info!(request_id = %ctx.request_id, role_id = %id, "created role");
        Ok(())
    }
}

pub struct PutRole {
    service: Arc<dyn RoleService>,
}

impl PutRole {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, role: Role) -> AppResult<()> {
        ctx.ensure_valid()?;
        let id = role.id().to_string();
        self.service.edit_role(role).await?;

        info!(request_id = %ctx.request_id, role_id = %id, "replaced role");
        Ok(())
    }
}

pub struct UpdateRole {
    service: Arc<dyn RoleService>,
}

impl UpdateRole {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, role: Role) -> AppResult<()> {
        ctx.ensure_valid()?;
        let id = role.id().to_string();
        self.service.update_role(role).await?;

        info!(request_id = %ctx.request_id, role_id = %id, "updated role");
        Ok(())
    }
}

pub struct DeleteRole {
    service: Arc<dyn RoleService>,
}

impl DeleteRole {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        ctx.ensure_valid()?;
        self.service.delete_role(id).await?;

        info!(request_id = %ctx.request_id, role_id = %id, "deleted role");
        Ok(())
    }
}

pub struct RoleUseCases {
    pub list: ListRoles,
    pub find: FindRole,
    pub search: SearchRoles,
    pub create: CreateRole,
    pub put: PutRole,
    pub update: UpdateRole,
    pub delete: DeleteRole,
}

impl RoleUseCases {
    pub fn new(service: Arc<dyn RoleService>) -> Self {
        Self {
            list: ListRoles::new(service.clone()),
            find: FindRole::new(service.clone()),
            search: SearchRoles::new(service.clone()),
            create: CreateRole::new(service.clone()),
            put: PutRole::new(service.clone()),
            update: UpdateRole::new(service.clone()),
            delete: DeleteRole::new(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRoleRepository;
    use crate::service::RoleManager;
    use domain::{NewRole, Pagination, PermissionSet, RoleSearchParams, SearchParams};
    use tokio_test::assert_ok;

    fn staff(id: &str) -> Role {
        Role::new(NewRole {
            id: id.to_string(),
            custom_id: "staff".to_string(),
            name: "Staff".to_string(),
            permissions: PermissionSet::new(vec![
                "USER_READ".to_string(),
                "ROLE_MANAGE".to_string(),
            ]),
            is_enable: true,
            ..Default::default()
        })
    }

    fn use_cases(repo: MockRoleRepository) -> RoleUseCases {
        RoleUseCases::new(Arc::new(RoleManager::new(Arc::new(repo))))
    }

    #[tokio::test]
    async fn test_list_serializes_under_data_key() {
        let mut repo = MockRoleRepository::new();
        repo.expect_list()
            .returning(|_| Ok(Page::new(vec![staff("r-1")], 1)));

        let ctx = RequestContext::new("req-1", Pagination::default());
        let dto = assert_ok!(use_cases(repo).list.run(&ctx).await);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["total_count"], 1);
        assert_eq!(json["pages"], 1);
        assert_eq!(json["data"][0]["permission"], (1 << 0) | (1 << 24));
    }

    #[tokio::test]
    async fn test_search_uses_role_params() {
        let mut repo = MockRoleRepository::new();
        repo.expect_search()
            .withf(|params, _| params.is_system.as_deref() == Some("false"))
            .returning(|_, _| Ok(Page::new(vec![], 0)));

        let ctx = RequestContext::new("req-1", Pagination::default()).with_search(
            SearchParams::Role(RoleSearchParams {
                is_system: Some("false".to_string()),
                ..Default::default()
            }),
        );
        let dto = assert_ok!(use_cases(repo).search.run(&ctx).await);

        assert_eq!(dto.total_count, 0);
        assert_eq!(dto.pages, 0);
        assert!(dto.roles.is_empty());
    }
}
