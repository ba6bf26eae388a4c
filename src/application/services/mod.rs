//! Business logic services for the application layer.

pub mod topic_service;
pub mod upload_service;

pub use topic_service::TopicService;
pub use upload_service::UploadService;
