//! Placeholder value endpoints.

use axum::response::Json;

use crate::api::extractors::RequestContext;
use crate::config::GREETING_MESSAGE;
use crate::types::{ApiResponse, MessageResponse};

#[utoipa::path(
    get,
    path = "/values/",
    tag = "Values",
    responses(
        (status = 200, description = "Stub value", body = MessageResponse)
    )
)]
pub async fn values(ctx: RequestContext) -> Json<ApiResponse<MessageResponse>> {
    ctx.success(MessageResponse::new(GREETING_MESSAGE))
}

#[utoipa::path(
    get,
    path = "/v2/values/",
    tag = "Values",
    responses(
        (status = 200, description = "Stub value, second API version", body = MessageResponse)
    )
)]
pub async fn values_v2(ctx: RequestContext) -> Json<ApiResponse<MessageResponse>> {
    ctx.success(MessageResponse::new(GREETING_MESSAGE))
}
