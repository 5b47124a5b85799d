//! Custom extractors.

mod request_context;
mod validated_json;

pub use request_context::RequestContext;
pub use validated_json::ValidatedJson;
