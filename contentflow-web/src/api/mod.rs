mod client;
pub mod csrf;
mod error;

pub use client::{ApiClient, LikeApi, LIKE_TOGGLE_PATH};
pub use error::{ApiError, ApiResult};
