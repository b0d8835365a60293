//! Post status and the status-scoped identity predicate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a post.
///
/// ```text
///  [none] ── create(draft) ──► draft ── publish ──► published
///  [none] ── create(published) ─────────────────► published
///  draft | published ── delete ──► [none]
/// ```
///
/// The transition is one-way: nothing moves a post back to `draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Unpublished work, excluded from the public listing.
    Draft,
    /// Visible in the public listing.
    Published,
}

/// Column a status listing is ordered by, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
    /// `publish_date DESC`.
    PublishDate,
    /// `created_at DESC`.
    CreatedAt,
}

impl PostStatus {
    /// Returns the lowercase form stored in the `posts.status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Ordering used when listing posts with this status.
    #[must_use]
    pub const fn listing_order(self) -> ListingOrder {
        match self {
            Self::Draft => ListingOrder::CreatedAt,
            Self::Published => ListingOrder::PublishDate,
        }
    }

    /// Returns `true` if a row with this status is visible through an
    /// operation scoped to `scope`.
    ///
    /// `None` means the operation is not status-scoped. A mismatch must be
    /// reported as "not found", never as a separate authorization failure.
    #[must_use]
    pub fn belongs_to(self, scope: Option<Self>) -> bool {
        scope.is_none_or(|expected| expected == self)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string outside `{draft, published}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
