//! Application route configuration.

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::extractors::RequestContext;
use super::handlers::{index_handler, user_routes, values_handler};
use super::openapi::ApiDoc;
use super::AppState;
use crate::errors::{ApiError, AppError};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index_handler::index))
        .route("/health/", get(index_handler::health))
        .route("/values/", get(values_handler::values))
        .route("/v2/values/", get(values_handler::values_v2))
        .merge(user_routes())
        .fallback(not_found);

    // OpenAPI Swagger UI documentation
    if state.environment.is_development() {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    // Global middleware, outermost first
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(state.cors.layer());

    router.layer(middleware).with_state(state)
}

/// Unmatched routes
async fn not_found(ctx: RequestContext) -> ApiError {
    ctx.fail(AppError::NotFound)
}
