//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{PaginatedModel, PaginationParams, Paginator};
pub use response::{ApiResponse, MessageResponse, ResponseError};
