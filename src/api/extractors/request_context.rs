//! Per-request envelope context.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, Extensions, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tower_http::request_id::RequestId;

use crate::api::AppState;
use crate::config::REQUEST_ID_HEADER;
use crate::errors::{ApiError, AppError};
use crate::types::ApiResponse;

/// Request id and stack policy needed to build response envelopes.
///
/// Extraction never fails, so handlers can always answer with an envelope.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub expose_stack: bool,
}

impl RequestContext {
    pub fn resolve(extensions: &Extensions, headers: &HeaderMap, state: &AppState) -> Self {
        let request_id = extensions
            .get::<RequestId>()
            .map(RequestId::header_value)
            .or_else(|| headers.get(REQUEST_ID_HEADER))
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Self {
            request_id,
            expose_stack: state.environment.exposes_stack(),
        }
    }

    /// 200 envelope carrying `data`
    pub fn success<T: Serialize>(&self, data: T) -> Json<ApiResponse<T>> {
        Json(ApiResponse::success(self.request_id.clone(), data))
    }

    /// 201 envelope carrying `data`
    pub fn created<T: Serialize>(&self, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
        (StatusCode::CREATED, self.success(data))
    }

    /// 200 envelope with `data: null`
    pub fn empty(&self) -> Json<ApiResponse<()>> {
        Json(ApiResponse::empty(self.request_id.clone()))
    }

    pub fn fail(&self, error: impl Into<AppError>) -> ApiError {
        ApiError {
            request_id: self.request_id.clone(),
            expose_stack: self.expose_stack,
            error: error.into(),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(&parts.extensions, &parts.headers, state))
    }
}
