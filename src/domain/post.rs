//! The post aggregate and validated submission fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PostId, PostStatus};

/// Author recorded when a submission names none.
pub const DEFAULT_AUTHOR: &str = "anonymous";

/// A stored post, as returned by every read and write operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    /// Store-assigned identifier (immutable).
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Markdown source of the post body.
    pub content: String,
    /// Author name, `"anonymous"` when none was given.
    pub author: String,
    /// Current lifecycle state.
    pub status: PostStatus,
    /// Insertion timestamp, assigned once by the store.
    pub created_at: DateTime<Utc>,
    /// Moment the post became published; `null` for unpublished drafts.
    pub publish_date: Option<DateTime<Utc>>,
}

/// Request body for creating or editing a post.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PostSubmission {
    /// Required, non-empty.
    #[serde(default)]
    pub title: Option<String>,
    /// Required, non-empty markdown source.
    #[serde(default)]
    pub content: Option<String>,
    /// Optional; defaults to `"anonymous"`.
    #[serde(default)]
    pub author: Option<String>,
}

/// Submission fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    /// Non-empty title.
    pub title: String,
    /// Non-empty content.
    pub content: String,
    /// Author, already defaulted.
    pub author: String,
}

/// A required submission field was missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} is required and must not be empty")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
}

impl PostSubmission {
    /// Validates the submission.
    ///
    /// Whitespace-only values count as empty. Stored values are kept
    /// verbatim, surrounding whitespace included.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first missing or blank
    /// required field (`title` is checked before `content`).
    pub fn validate(self) -> Result<PostFields, ValidationError> {
        let title = required(self.title, "title")?;
        let content = required(self.content, "content")?;
        let author = self
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        Ok(PostFields {
            title,
            content,
            author,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError { field })
}
