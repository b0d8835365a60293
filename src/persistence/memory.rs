//! In-memory post store.
//!
//! [`InMemoryPostStore`] keeps every row in a `BTreeMap` behind a single
//! [`tokio::sync::RwLock`]. It follows the same ordering and scoping rules
//! as the PostgreSQL store and backs the server when persistence is
//! disabled.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{PostStore, StoreError};
use crate::domain::{ListingOrder, Post, PostFields, PostId, PostStatus};

/// Process-local post store.
///
/// # Concurrency
///
/// Reads run concurrently; every write takes the lock exclusively, so a
/// racing pair of deletes on one id sees exactly one affected row.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<PostId, Post>,
    last_id: i64,
    last_stamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    fn next_id(&mut self) -> Result<PostId, StoreError> {
        let next = self
            .last_id
            .checked_add(1)
            .and_then(PostId::new)
            .ok_or_else(|| StoreError::Database("post id space exhausted".to_string()))?;
        self.last_id = next.get();
        Ok(next)
    }

    /// Wall-clock time, nudged forward so stamps are strictly increasing.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

impl InMemoryPostStore {
    /// Creates an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored posts, regardless of status.
    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    /// Returns `true` if the store holds no posts.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.rows.is_empty()
    }
}

fn scoped(post: &Post, scope: Option<PostStatus>) -> bool {
    post.status.belongs_to(scope)
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, fields: &PostFields, status: PostStatus) -> Result<Post, StoreError> {
        let mut state = self.state.write().await;
        let id = state.next_id()?;
        let created_at = state.next_stamp();
        let post = Post {
            id,
            title: fields.title.clone(),
            content: fields.content.clone(),
            author: fields.author.clone(),
            status,
            created_at,
            publish_date: (status == PostStatus::Published).then_some(created_at),
        };
        state.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(
        &self,
        id: PostId,
        scope: Option<PostStatus>,
    ) -> Result<Option<Post>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).filter(|p| scoped(p, scope)).cloned())
    }

    async fn list_by_status(&self, status: PostStatus) -> Result<Vec<Post>, StoreError> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state
            .rows
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect();

        match status.listing_order() {
            // `None` sorts below `Some`, so undated rows land last.
            ListingOrder::PublishDate => posts.sort_by(|a, b| {
                b.publish_date
                    .cmp(&a.publish_date)
                    .then_with(|| b.id.cmp(&a.id))
            }),
            ListingOrder::CreatedAt => posts.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            }),
        }
        Ok(posts)
    }

    async fn update_status(
        &self,
        id: PostId,
        status: PostStatus,
    ) -> Result<Option<Post>, StoreError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id) {
            return Ok(None);
        }
        let stamp = state.next_stamp();
        let Some(post) = state.rows.get_mut(&id) else {
            return Ok(None);
        };
        post.status = status;
        if status == PostStatus::Published && post.publish_date.is_none() {
            post.publish_date = Some(stamp);
        }
        Ok(Some(post.clone()))
    }

    async fn update_content(
        &self,
        id: PostId,
        fields: &PostFields,
        scope: Option<PostStatus>,
    ) -> Result<Option<Post>, StoreError> {
        let mut state = self.state.write().await;
        let Some(post) = state.rows.get_mut(&id).filter(|p| scoped(p, scope)) else {
            return Ok(None);
        };
        post.title.clone_from(&fields.title);
        post.content.clone_from(&fields.content);
        post.author.clone_from(&fields.author);
        Ok(Some(post.clone()))
    }

    async fn delete_by_id(
        &self,
        id: PostId,
        scope: Option<PostStatus>,
    ) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let matches = state.rows.get(&id).is_some_and(|p| scoped(p, scope));
        if matches {
            state.rows.remove(&id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
