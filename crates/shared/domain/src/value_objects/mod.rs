//! Value objects wrapping primitive fields.
//!
//! Each value object is an immutable newtype that owns its own format rule.
//! Entities compose these rules into their `validate()` checks.

mod custom_id;
mod email;
mod permission;
mod role_name;

pub use custom_id::CustomId;
pub use email::{ExternalEmail, InternalEmail};
pub use permission::{Permission, PermissionSet};
pub use role_name::RoleName;
