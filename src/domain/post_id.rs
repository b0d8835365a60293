//! Type-safe post identifier.
//!
//! [`PostId`] is a newtype wrapper around the store-assigned `BIGSERIAL`
//! key so that post identifiers cannot be confused with other integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a post.
///
/// Assigned by the store at insertion time and immutable thereafter.
/// Always strictly positive; identifiers are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wraps a raw key, returning `None` unless it is strictly positive.
    #[must_use]
    pub const fn new(raw: i64) -> Option<Self> {
        if raw > 0 { Some(Self(raw)) } else { None }
    }

    /// Returns the raw key as stored in the `posts.id` column.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A path segment that is not a valid post identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid post id: {0:?}")]
pub struct InvalidPostId(pub String);

impl FromStr for PostId {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidPostId(s.to_string()))
    }
}

impl From<PostId> for i64 {
    fn from(id: PostId) -> Self {
        id.0
    }
}
