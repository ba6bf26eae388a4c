//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod topics;
pub mod upload;

pub use health::health_handler;
pub use topics::{
    create_topic_handler, delete_topic_handler, get_topic_handler, list_topics_handler,
    update_progress_handler,
};
pub use upload::upload_handler;
