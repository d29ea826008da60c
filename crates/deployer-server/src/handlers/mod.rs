//! HTTP handlers

pub mod deploy;
pub mod health;
pub mod history;

pub use health::health;

use crate::error::ApiError;

pub async fn post_only() -> ApiError {
    ApiError::MethodNotAllowed { allow: "POST" }
}

pub async fn get_only() -> ApiError {
    ApiError::MethodNotAllowed { allow: "GET,HEAD" }
}
