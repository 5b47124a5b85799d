//! Index and health check handlers.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::RequestContext;
use crate::api::AppState;
use crate::config::{GREETING_MESSAGE, HEALTH_OK};
use crate::errors::ApiError;
use crate::types::{ApiResponse, MessageResponse};

/// Health check payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub health: String,
}

/// Greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "Index",
    responses(
        (status = 200, description = "Greeting message", body = MessageResponse)
    )
)]
pub async fn index(ctx: RequestContext) -> Json<ApiResponse<MessageResponse>> {
    ctx.success(MessageResponse::new(GREETING_MESSAGE))
}

/// Health check endpoint with database connectivity check
#[utoipa::path(
    get,
    path = "/health/",
    tag = "Index",
    responses(
        (status = 200, description = "Service and database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = crate::types::ResponseError)
    )
)]
pub async fn health(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, (StatusCode, ApiError)> {
    if let Err(e) = state.database.ping().await {
        tracing::warn!("Health check failed: {}", e);
        return Err((StatusCode::SERVICE_UNAVAILABLE, ctx.fail(e)));
    }

    Ok(ctx.success(HealthResponse {
        health: HEALTH_OK.to_string(),
    }))
}
