// Library interface for the Contentflow page components
#[macro_use]
pub mod logging;

pub mod api;
pub mod caption;
pub mod config;
pub mod dom;
pub mod likes;
pub mod menu;
pub mod modal;
pub mod post_time;

pub use api::{ApiClient, ApiError, ApiResult, LikeApi};
pub use dom::{Document, Gallery, LikeSurface, ModalRegion, ModalSurface};
pub use likes::LikeToggleController;
pub use modal::{ModalController, ModalSession};
