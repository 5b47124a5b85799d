//! User handlers.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{RequestContext, ValidatedJson};
use crate::api::AppState;
use crate::domain::{User, UserFields};
use crate::errors::{ApiResult, AppError};
use crate::types::{ApiResponse, PaginatedModel, PaginationParams, Paginator};

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(url)]
    pub profile_image: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 16))]
    pub post_code: Option<String>,
}

/// User update request; omitted fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub profile_image: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 16))]
    pub post_code: Option<String>,
}

impl From<CreateUserRequest> for UserFields {
    fn from(req: CreateUserRequest) -> Self {
        UserFields {
            first_name: Some(req.first_name),
            last_name: Some(req.last_name),
            email: Some(req.email),
            profile_image: req.profile_image,
            birth_date: req.birth_date,
            bio: req.bio,
            phone_number: req.phone_number,
            country: req.country,
            state: req.state,
            area: req.area,
            city: req.city,
            address: req.address,
            post_code: req.post_code,
        }
    }
}

impl From<UpdateUserRequest> for UserFields {
    fn from(req: UpdateUserRequest) -> Self {
        UserFields {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            profile_image: req.profile_image,
            birth_date: req.birth_date,
            bio: req.bio,
            phone_number: req.phone_number,
            country: req.country,
            state: req.state,
            area: req.area,
            city: req.city,
            address: req.address,
            post_code: req.post_code,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn user_id(ctx: &RequestContext, path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|e| ctx.fail(AppError::bad_request(e.body_text())))
}

/// List users page by page
#[utoipa::path(
    get,
    path = "/users/",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of users with its paginator", body = Paginator),
        (status = 400, description = "Unknown order column or direction")
    )
)]
pub async fn list_users(
    ctx: RequestContext,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedModel<User>>>> {
    let mut paginator = Paginator::from_params(&params);
    let users = state
        .users
        .get_all(&mut paginator)
        .await
        .map_err(|e| ctx.fail(e))?;

    Ok(ctx.success(PaginatedModel::new(users, paginator)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = user_id(&ctx, path)?;
    let user = state.users.get_by_id(id).await.map_err(|e| ctx.fail(e))?;

    Ok(ctx.success(user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users/",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state
        .users
        .create(payload.into())
        .await
        .map_err(|e| ctx.fail(e))?;

    Ok(ctx.created(user))
}

/// Update the provided fields of a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = user_id(&ctx, path)?;
    let user = state
        .users
        .update(id, payload.into())
        .await
        .map_err(|e| ctx.fail(e))?;

    Ok(ctx.success(user))
}

/// Soft delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = user_id(&ctx, path)?;
    state.users.delete(id).await.map_err(|e| ctx.fail(e))?;

    Ok(ctx.empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_maps_only_present_fields() {
        let fields: UserFields = UpdateUserRequest {
            city: Some("Zagreb".to_string()),
            ..Default::default()
        }
        .into();

        assert_eq!(fields.city.as_deref(), Some("Zagreb"));
        assert!(fields.first_name.is_none());
        assert!(fields.email.is_none());
    }

    #[test]
    fn test_create_request_validation_tags() {
        let req = CreateUserRequest {
            first_name: String::new(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            profile_image: None,
            birth_date: None,
            bio: None,
            phone_number: None,
            country: None,
            state: None,
            area: None,
            city: None,
            address: None,
            post_code: None,
        };

        let map = AppError::from(req.validate().unwrap_err())
            .validation_map()
            .unwrap();

        assert_eq!(map["email"], "email_email");
        assert_eq!(map["first_name"], "first_name_length");
        assert!(!map.contains_key("last_name"));
    }
}
