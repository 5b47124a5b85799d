//! HTTP request handlers.

pub mod index_handler;
pub mod user_handler;
pub mod values_handler;

pub use user_handler::user_routes;
