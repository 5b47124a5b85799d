//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::RequestContext;
use crate::api::AppState;
use crate::errors::{ApiError, AppError};

/// JSON extractor that validates the payload and rejects with the error
/// envelope.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use template_api::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUserRequest {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUserRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        // The body is consumed below, so capture the request id first
        let ctx = RequestContext::resolve(req.extensions(), req.headers(), state);

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ctx.fail(AppError::bad_request(e.body_text())))?;

        value.validate().map_err(|e| ctx.fail(e))?;

        Ok(ValidatedJson(value))
    }
}
