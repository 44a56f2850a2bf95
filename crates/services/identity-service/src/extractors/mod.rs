//! Request extractors.

mod request_context;
mod validated_json;

pub use request_context::{Ctx, SearchQuery, REQUEST_ID_HEADER};
pub use validated_json::ValidatedJson;
