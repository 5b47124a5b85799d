//! API middleware.

mod cors;

pub use cors::{CorsSettings, OriginRule};
