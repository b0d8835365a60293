//! Database row model for the `posts` table.

use chrono::{DateTime, Utc};

use super::StoreError;
use crate::domain::{Post, PostId};

/// A raw row from the `posts` table.
///
/// `status` is stored as text under a `CHECK` constraint and parsed into
/// [`crate::domain::PostStatus`] on the way out.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Author name.
    pub author: String,
    /// `'draft'` or `'published'`.
    pub status: String,
    /// Server-side insertion timestamp.
    pub created_at: DateTime<Utc>,
    /// Publication timestamp, `NULL` until published.
    pub publish_date: Option<DateTime<Utc>>,
}

impl TryFrom<PostRow> for Post {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let id = PostId::new(row.id).ok_or_else(|| StoreError::CorruptRow {
            id: row.id,
            reason: "non-positive id".to_string(),
        })?;
        let status = row.status.parse().map_err(|e| StoreError::CorruptRow {
            id: row.id,
            reason: format!("{e}"),
        })?;
        Ok(Self {
            id,
            title: row.title,
            content: row.content,
            author: row.author,
            status,
            created_at: row.created_at,
            publish_date: row.publish_date,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;

    fn row(id: i64, status: &str) -> PostRow {
        PostRow {
            id,
            title: "title".to_string(),
            content: "body".to_string(),
            author: "anonymous".to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
            publish_date: None,
        }
    }

    #[test]
    fn maps_valid_row() {
        let Ok(post) = Post::try_from(row(4, "draft")) else {
            panic!("row is valid");
        };
        assert_eq!(post.id.get(), 4);
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn rejects_unknown_status() {
        let result = Post::try_from(row(4, "archived"));
        assert!(matches!(result, Err(StoreError::CorruptRow { id: 4, .. })));
    }

    #[test]
    fn rejects_non_positive_id() {
        let result = Post::try_from(row(0, "published"));
        assert!(matches!(result, Err(StoreError::CorruptRow { id: 0, .. })));
    }
}
