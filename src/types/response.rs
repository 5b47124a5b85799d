use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard API response envelope (consistent response format).
///
/// Every key is always serialized; absent data or error render as `null`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    pub data: Option<T>,
    pub error: Option<ResponseError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(request_id: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            request_id: request_id.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without payload
    pub fn empty(request_id: impl Into<String>) -> Self {
        Self {
            success: true,
            request_id: request_id.into(),
            data: None,
            error: None,
        }
    }

    pub fn failure(request_id: impl Into<String>, error: ResponseError) -> Self {
        Self {
            success: false,
            request_id: request_id.into(),
            data: None,
            error: Some(error),
        }
    }
}

/// Error body carried in the envelope's `error` field
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResponseError {
    /// Machine readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Innermost cause of the error
    pub cause: String,
    /// Error description
    pub message: String,
    /// Error chain, empty in production
    pub stack: String,
    /// Field to `<field>_<rule>` map for invalid request bodies
    pub validation: Option<BTreeMap<String, String>>,
}

/// Message-only payload (index and stub endpoints)
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_keeps_every_key() {
        let json = serde_json::to_value(ApiResponse::success("req-1", MessageResponse::new("Hello!")))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "request_id": "req-1",
                "data": { "message": "Hello!" },
                "error": null
            })
        );
    }

    #[test]
    fn failure_envelope_has_null_data() {
        let error = ResponseError {
            code: "NOT_FOUND".to_string(),
            cause: "Resource not found".to_string(),
            message: "Resource not found".to_string(),
            stack: String::new(),
            validation: None,
        };
        let json = serde_json::to_value(ApiResponse::failure("req-2", error)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["validation"], serde_json::Value::Null);
        let keys: Vec<_> = json["error"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
    }
}
