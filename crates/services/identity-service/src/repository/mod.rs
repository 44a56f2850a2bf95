//! Repository layer for data access.

pub mod entities;
mod role_repository;
mod user_repository;

use common::AppError;
use domain::DomainError;
use sea_orm::{DbErr, SqlErr};

pub use role_repository::{RoleRepository, RoleStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Classify unique-key violations as `DuplicateEntry`; everything else stays a
/// database error.
pub(crate) fn map_db_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!(%detail, "duplicate entry");
            DomainError::duplicate(detail).into()
        }
        _ => AppError::from(err),
    }
}
