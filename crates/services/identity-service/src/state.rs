//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::IdentityServiceConfig;
use crate::infra::Database;
use crate::repository::{RoleRepository, UserRepository};
use crate::service::{RoleManager, UserManager, UserRoleManager};
use crate::usecase::{RoleUseCases, UserRoleUseCases, UserUseCases};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserUseCases>,
    pub roles: Arc<RoleUseCases>,
    pub user_roles: Arc<UserRoleUseCases>,
    /// Absent when the router runs without a database (tests)
    pub database: Option<Database>,
    pub config: Arc<IdentityServiceConfig>,
}

impl AppState {
    /// Wire repositories through services into use cases.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        role_repo: Arc<dyn RoleRepository>,
        config: IdentityServiceConfig,
    ) -> Self {
        let user_role_service = Arc::new(UserRoleManager::new(
            user_repo.clone(),
            role_repo.clone(),
        ));
        let user_service = Arc::new(UserManager::new(user_repo));
        let role_service = Arc::new(RoleManager::new(role_repo));

        Self {
            users: Arc::new(UserUseCases::new(user_service)),
            roles: Arc::new(RoleUseCases::new(role_service)),
            user_roles: Arc::new(UserRoleUseCases::new(user_role_service)),
            database: None,
            config: Arc::new(config),
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }
}
