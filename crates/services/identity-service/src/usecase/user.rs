//! User use cases.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use common::AppResult;
use domain::{Page, RequestContext, User};

use crate::service::UserService;

/// User as returned to clients. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    #[schema(example = "3f0c9a8e-4d4b-4d67-9c55-2a0f3f2d1b7e")]
    pub id: String,
    #[schema(example = "2024.stud01@uniproject.jp")]
    pub email: String,
    #[schema(example = "stud01")]
    pub custom_id: String,
    pub name: String,
    #[schema(example = "real@example.com")]
    pub external_email: String,
    #[schema(example = "2024")]
    pub period: String,
    pub is_enable: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            custom_id: user.custom_id().to_string(),
            name: user.name().to_string(),
            external_email: user.external_email().to_string(),
            period: user.period().to_string(),
            is_enable: user.is_enable(),
        }
    }
}

/// Paged user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersDto {
    pub total_count: u64,
    /// Number of pages at the requested page size
    pub pages: u64,
    pub users: Vec<UserDto>,
}

impl UsersDto {
    fn from_page(page: &Page<User>, ctx: &RequestContext) -> Self {
        Self {
            total_count: page.total_count,
            pages: ctx.pagination.total_pages(page.total_count),
            users: page.items.iter().map(UserDto::from).collect(),
        }
    }
}

// =============================================================================
// Use cases
// =============================================================================

pub struct ListUsers {
    service: Arc<dyn UserService>,
}

impl ListUsers {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext) -> AppResult<UsersDto> {
        ctx.ensure_valid()?;
        let page = self.service.list_users(ctx.pagination).await?;

        info!(request_id = %ctx.request_id, total = page.total_count, "listed users");
        Ok(UsersDto::from_page(&page, ctx))
    }
}

pub struct FindUser {
    service: Arc<dyn UserService>,
}

impl FindUser {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, id: &str) -> AppResult<UserDto> {
        ctx.ensure_valid()?;
        let user = self.service.find_user(id).await?;

        info!(request_id = %ctx.request_id, user_id = %id, "found user");
        Ok(UserDto::from(&user))
    }
}

pub struct SearchUsers {
    service: Arc<dyn UserService>,
}

impl SearchUsers {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext) -> AppResult<UsersDto> {
        ctx.ensure_valid()?;
        let params = ctx.user_search()?;
        let page = self.service.search_users(params, ctx.pagination).await?;

        info!(request_id = %ctx.request_id, total = page.total_count, "searched users");
        Ok(UsersDto::from_page(&page, ctx))
    }
}

pub struct CreateUser {
    service: Arc<dyn UserService>,
}

impl CreateUser {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, user: User) -> AppResult<()> {
        ctx.ensure_valid()?;
        let id = user.id().to_string();
        self.service.create_user(user).await?;

        info!(request_id = %ctx.request_id, user_id = %id, "created user");
        Ok(())
    }
}

/// Full replacement (`PUT`).
pub struct PutUser {
    service: Arc<dyn UserService>,
}

impl PutUser {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, user: User) -> AppResult<()> {
        ctx.ensure_valid()?;
        let id = user.id().to_string();
        self.service.edit_user(user).await?;

        info!(request_id = %ctx.request_id, user_id = %id, "replaced user");
        Ok(())
    }
}

/// Partial update (`PATCH`).
pub struct UpdateUser {
    service: Arc<dyn UserService>,
}

impl UpdateUser {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, user: User) -> AppResult<()> {
        ctx.ensure_valid()?;
        let id = user.id().to_string();
        self.service.update_user(user).await?;

        info!(request_id = %ctx.request_id, user_id = %id, "updated user");
        Ok(())
    }
}

pub struct DeleteUser {
    service: Arc<dyn UserService>,
}

impl DeleteUser {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        ctx.ensure_valid()?;
        self.service.delete_user(id).await?;

        info!(request_id = %ctx.request_id, user_id = %id, "deleted user");
        Ok(())
    }
}

/// Every user use case, wired to one service.
pub struct UserUseCases {
    pub list: ListUsers,
    pub find: FindUser,
    pub search: SearchUsers,
    pub create: CreateUser,
    pub put: PutUser,
    pub update: UpdateUser,
    pub delete: DeleteUser,
}

impl UserUseCases {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self {
            list: ListUsers::new(service.clone()),
            find: FindUser::new(service.clone()),
            search: SearchUsers::new(service.clone()),
            create: CreateUser::new(service.clone()),
            put: PutUser::new(service.clone()),
            update: UpdateUser::new(service.clone()),
            delete: DeleteUser::new(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use crate::service::UserManager;
    use domain::{
        DomainError, NewUser, Pagination, RoleSearchParams, SearchParams, UserSearchParams,
    };
    use tokio_test::{assert_err, assert_ok};

    fn student(id: &str) -> User {
        User::new(NewUser {
            id: id.to_string(),
            email: "2024.stud01@uniproject.jp".to_string(),
            custom_id: "stud01".to_string(),
            name: "Student".to_string(),
            external_email: "real@example.com".to_string(),
            period: "2024".to_string(),
            is_enable: true,
            password_hash: Some("secret-hash".to_string()),
            ..Default::default()
        })
    }

    fn use_cases(repo: MockUserRepository) -> UserUseCases {
        UserUseCases::new(Arc::new(UserManager::new(Arc::new(repo))))
    }

    fn ctx() -> RequestContext {
        RequestContext::new("req-1", Pagination::new(10, 1))
    }

    #[tokio::test]
    async fn test_list_computes_page_count() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|_| Ok(Page::new(vec![student("u-1"), student("u-2")], 21)));

        let dto = assert_ok!(use_cases(repo).list.run(&ctx()).await);

        assert_eq!(dto.total_count, 21);
        assert_eq!(dto.pages, 3);
        assert_eq!(dto.users.len(), 2);
        assert_eq!(dto.users[0].email, "2024.stud01@uniproject.jp");
    }

    #[tokio::test]
    async fn test_rejects_context_without_request_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().never();

        let ctx = RequestContext::new("", Pagination::default());
        let err = assert_err!(use_cases(repo).list.run(&ctx).await);

        assert_eq!(err.domain(), Some(&DomainError::InvalidRequestContext));
    }

    #[tokio::test]
    async fn test_search_requires_user_params() {
        let mut repo = MockUserRepository::new();
        repo.expect_search().never();
        let cases = use_cases(repo);

        let err = assert_err!(cases.search.run(&ctx()).await);
        assert!(matches!(err.domain(), Some(DomainError::InvalidSearchParams(_))));

        let wrong_kind = ctx().with_search(SearchParams::Role(RoleSearchParams::default()));
        let err = assert_err!(cases.search.run(&wrong_kind).await);
        assert!(matches!(err.domain(), Some(DomainError::InvalidSearchParams(_))));
    }

    #[tokio::test]
    async fn test_search_passes_params_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_search()
            .withf(|params, _| params.custom_id.as_deref() == Some("stud01"))
            .returning(|_, _| Ok(Page::new(vec![student("u-1")], 1)));

        let ctx = ctx().with_search(SearchParams::User(UserSearchParams {
            custom_id: Some("stud01".to_string()),
            ..Default::default()
        }));
        let dto = assert_ok!(use_cases(repo).search.run(&ctx).await);

        assert_eq!(dto.pages, 1);
        assert_eq!(dto.users[0].id, "u-1");
    }

    #[tokio::test]
    async fn test_find_projects_without_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(student(id))));

        let dto = assert_ok!(use_cases(repo).find.run(&ctx(), "u-9").await);
        let json = serde_json::to_string(&dto).unwrap();

        assert_eq!(dto.id, "u-9");
        assert!(!json.contains("secret-hash"));
    }

    #[tokio::test]
    async fn test_create_put_update_delete() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(1).returning(|_| Ok(()));
        repo.expect_save().times(1).returning(|_| Ok(()));
        repo.expect_update().times(1).returning(|_| Ok(()));
        repo.expect_delete().times(1).returning(|_| Ok(()));
        let cases = use_cases(repo);

        assert_ok!(cases.create.run(&ctx(), student("u-1")).await);
        assert_ok!(cases.put.run(&ctx(), student("u-1")).await);
        assert_ok!(cases.update.run(&ctx(), student("u-1")).await);
        assert_ok!(cases.delete.run(&ctx(), "u-1").await);
    }
}
