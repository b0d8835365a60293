//! Service layer: the post lifecycle.
//!
//! [`PostService`] validates input, enforces the draft → published state
//! machine, and maps store outcomes to [`crate::error::GatewayError`].

pub mod post_service;

pub use post_service::PostService;
