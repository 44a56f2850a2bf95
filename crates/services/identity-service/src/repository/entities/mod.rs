//! SeaORM entity definitions.

pub mod role;
pub mod user;
pub mod user_role;
