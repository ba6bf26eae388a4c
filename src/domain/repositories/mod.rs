//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for testing.

pub mod topic_repository;

pub use topic_repository::TopicRepository;

#[cfg(test)]
pub use topic_repository::MockTopicRepository;
