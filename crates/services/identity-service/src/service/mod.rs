//! Domain services: the single path between use cases and repositories.
//!
//! Validation runs here before any write. Errors from validation and from the
//! repository are passed through unchanged.

mod role_service;
mod user_role_service;
mod user_service;

pub use role_service::{RoleManager, RoleService};
pub use user_role_service::{UserRoleManager, UserRoleService};
pub use user_service::{UserManager, UserService};
