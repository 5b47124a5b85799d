//! Business layer - request-facing use cases over the services.

mod user_business;

pub use user_business::{UserBusiness, UserRegistry};
