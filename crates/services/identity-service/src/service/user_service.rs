//! User service - validation and persistence of members.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{Page, Pagination, User, UserSearchParams};
use tracing::instrument;

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self, pagination: Pagination) -> AppResult<Page<User>>;

    /// Missing users are reported as `NotFound("User")`
    async fn find_user(&self, id: &str) -> AppResult<User>;

    async fn search_users(
        &self,
        params: &UserSearchParams,
        pagination: Pagination,
    ) -> AppResult<Page<User>>;

    /// Validate, then insert
    async fn create_user(&self, user: User) -> AppResult<()>;

    /// Validate, then replace the stored row
    async fn edit_user(&self, user: User) -> AppResult<()>;

    /// Validate, then write the non-empty fields
    async fn update_user(&self, user: User) -> AppResult<()>;

    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, pagination: Pagination) -> AppResult<Page<User>> {
        self.repo.list(pagination).await
    }

    async fn find_user(&self, id: &str) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn search_users(
        &self,
        params: &UserSearchParams,
        pagination: Pagination,
    ) -> AppResult<Page<User>> {
        params.validate()?;
        self.repo.search(params, pagination).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn create_user(&self, user: User) -> AppResult<()> {
        user.validate()?;
        self.repo.create(&user).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn edit_user(&self, user: User) -> AppResult<()> {
        user.validate()?;
        self.repo.save(&user).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn update_user(&self, user: User) -> AppResult<()> {
        user.validate()?;
        self.repo.update(&user).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
