//! Template API - a layered REST API template
//!
//! A users resource served through repository, service, business and
//! controller layers, with paginated and filterable listings.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities
//! - **infra**: Database connection, migrations and repositories
//! - **services**: Persistence use cases over the repositories
//! - **business**: Field merging rules used by the HTTP layer
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, response envelope)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod business;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserFields};
pub use errors::{AppError, AppResult};
pub use types::Paginator;
