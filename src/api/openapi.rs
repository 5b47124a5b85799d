//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration in development.

use utoipa::OpenApi;

use crate::api::handlers::{index_handler, user_handler, values_handler};
use crate::domain::User;
use crate::types::{MessageResponse, Paginator, ResponseError};

/// OpenAPI documentation for the template API.
///
/// Every documented body is delivered inside the
/// `{success, request_id, data, error}` envelope.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Template API",
        version = "0.1.0",
        description = "Layered REST API template with paginated, filterable user listings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        index_handler::index,
        index_handler::health,
        values_handler::values,
        values_handler::values_v2,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            User,
            Paginator,
            MessageResponse,
            ResponseError,
            index_handler::HealthResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Index", description = "Greeting and health check"),
        (name = "Values", description = "Placeholder endpoints"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in ["/", "/health/", "/values/", "/v2/values/", "/users/", "/users/{id}"] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
