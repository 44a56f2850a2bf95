//! HTTP handlers.

pub mod health;
pub mod roles;
pub mod user_roles;
pub mod users;

pub use health::health_routes;
pub use roles::role_routes;
pub use user_roles::user_role_routes;
pub use users::user_routes;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "success")]
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Ids are generated server-side when the client leaves them blank.
pub(crate) fn id_or_new(id: String) -> String {
    if id.trim().is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        id
    }
}

/// Replacing or patching needs the target id in the body.
pub(crate) fn required_id(id: String) -> common::AppResult<String> {
    if id.trim().is_empty() {
        return Err(common::AppError::bad_request("id is required"));
    }
    Ok(id)
}
