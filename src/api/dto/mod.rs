//! Data Transfer Objects for REST responses that are not domain types.
//!
//! Posts themselves are serialized directly from [`crate::domain::Post`],
//! and request bodies use [`crate::domain::PostSubmission`].

pub mod common_dto;

pub use common_dto::*;
