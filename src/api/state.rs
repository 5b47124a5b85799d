//! Application state - composition root for the request handlers.

use std::sync::Arc;

use crate::api::middleware::CorsSettings;
use crate::business::{UserBusiness, UserRegistry};
use crate::config::{Config, Environment};
use crate::errors::AppResult;
use crate::infra::{Database, UserStore};
use crate::services::UserManager;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// User use cases
    pub users: Arc<dyn UserBusiness>,
    /// Database connection
    pub database: Arc<Database>,
    /// Deployment environment, decides stack exposure and Swagger mounting
    pub environment: Environment,
    /// Allowed CORS origins
    pub cors: CorsSettings,
}

impl AppState {
    /// Wire store -> service -> business over the given database.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let store = Arc::new(UserStore::new(database.get_connection()));
        let service = Arc::new(UserManager::new(store));
        let users = Arc::new(UserRegistry::new(service));

        Ok(Self {
            users,
            database,
            environment: config.environment,
            cors: CorsSettings::from_config(config)?,
        })
    }
}
