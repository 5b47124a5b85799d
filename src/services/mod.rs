//! Application services layer - persistence use cases.
//!
//! Services wrap repositories behind traits so the layers above depend on
//! abstractions only.

mod user_service;

pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
