//! Domain layer: post identity, status, and the post aggregate.
//!
//! These types are shared by the persistence gateway and the lifecycle
//! service. They carry no I/O.

pub mod post;
pub mod post_id;
pub mod post_status;

pub use post::{DEFAULT_AUTHOR, Post, PostFields, PostSubmission, ValidationError};
pub use post_id::{InvalidPostId, PostId};
pub use post_status::{ListingOrder, PostStatus, UnknownStatus};
