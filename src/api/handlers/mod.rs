//! HTTP request handlers for the pipeline and service endpoints.

pub mod health;
pub mod image;
pub mod set_url;

pub use health::health_handler;
pub use image::image_handler;
pub use set_url::set_url_handler;
