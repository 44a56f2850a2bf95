//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the User and Role entities, the value objects that own their field rules,
//! permission bitflags, and the typed per-request context.

pub mod constants;
pub mod context;
pub mod error;
pub mod role;
pub mod user;
pub mod value_objects;

pub use constants::*;
pub use context::{
    Page, Pagination, RequestContext, RoleSearchParams, SearchParams, UserSearchParams,
};
pub use error::{DomainError, DomainResult};
pub use role::{NewRole, Role};
pub use user::{NewUser, User};
pub use value_objects::{CustomId, ExternalEmail, InternalEmail, Permission, PermissionSet, RoleName};
