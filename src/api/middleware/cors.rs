//! CORS policy with wildcard origin patterns.

use std::time::Duration;

use axum::http::{header, request, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{Config, CORS_ANY_ORIGIN, CORS_MAX_AGE_SECONDS};
use crate::errors::{AppError, AppResult};

/// One entry of the allowed origins list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    Any,
    Exact(String),
    /// `prefix*suffix`, either side may be empty
    Wildcard { prefix: String, suffix: String },
}

impl OriginRule {
    pub fn parse(pattern: &str) -> AppResult<Self> {
        let pattern = pattern.trim();
        if pattern == CORS_ANY_ORIGIN {
            return Ok(OriginRule::Any);
        }

        match pattern.matches('*').count() {
            0 => Ok(OriginRule::Exact(pattern.to_string())),
            1 => {
                let (prefix, suffix) = pattern.split_once('*').unwrap_or((pattern, ""));
                Ok(OriginRule::Wildcard {
                    prefix: prefix.to_string(),
                    suffix: suffix.to_string(),
                })
            }
            _ => Err(AppError::internal(format!(
                "CORS origin '{}' may contain at most one wildcard",
                pattern
            ))),
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginRule::Any => true,
            OriginRule::Exact(allowed) => allowed == origin,
            OriginRule::Wildcard { prefix, suffix } => {
                origin.len() >= prefix.len() + suffix.len()
                    && origin.starts_with(prefix.as_str())
                    && origin.ends_with(suffix.as_str())
            }
        }
    }
}

/// Validated CORS configuration.
#[derive(Debug, Clone)]
pub struct CorsSettings {
    origins: Vec<OriginRule>,
    allow_credentials: bool,
}

impl CorsSettings {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(&config.cors_allowed_origins, config.cors_allow_credentials)
    }

    pub fn new(origins: &[String], allow_credentials: bool) -> AppResult<Self> {
        let origins = origins
            .iter()
            .map(|o| OriginRule::parse(o))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            origins,
            allow_credentials,
        })
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.origins.iter().any(|rule| rule.matches(origin))
    }

    fn allows_any(&self) -> bool {
        self.origins.contains(&OriginRule::Any)
    }

    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::HEAD,
                Method::OPTIONS,
            ])
            .allow_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE])
            .max_age(Duration::from_secs(CORS_MAX_AGE_SECONDS));

        // A literal `*` cannot be sent together with credentials
        let layer = match (self.allows_any(), self.allow_credentials) {
            (true, false) => layer.allow_origin(Any),
            (true, true) => layer.allow_origin(AllowOrigin::mirror_request()),
            (false, _) => {
                let settings = self.clone();
                layer.allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _parts: &request::Parts| {
                        origin
                            .to_str()
                            .map(|o| settings.allows(o))
                            .unwrap_or(false)
                    },
                ))
            }
        };

        layer.allow_credentials(self.allow_credentials)
    }
}
