//! Application services
//!
//! Thin use cases over the repository traits. Each service owns an
//! `Arc<dyn ...Repository>` so tests can swap in an in-memory mock.

mod category;
mod task;
mod user;

pub use category::*;
pub use task::*;
pub use user::*;

use thiserror::Error;

/// Service-level error; its `Display` text is what clients receive
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("the email or password is not correct")]
    InvalidCredentials,

    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: todo_core::Error,
    },
}

impl ServiceError {
    pub(crate) fn repository(context: &'static str) -> impl FnOnce(todo_core::Error) -> Self {
        move |source| Self::Repository { context, source }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Serde helper: omit zero counters from responses
pub(crate) fn is_zero(count: &usize) -> bool {
    *count == 0
}
