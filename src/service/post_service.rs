//! Post service: validates requests and drives the post lifecycle.

use std::sync::Arc;

use crate::domain::{Post, PostId, PostStatus, PostSubmission};
use crate::error::GatewayError;
use crate::persistence::{PostStore, StoreError};

/// Orchestration layer for every post lifecycle operation.
///
/// Stateless coordinator over a [`PostStore`]. Every operation follows
/// the pattern: validate → one store call → map the outcome. Store
/// failures never escape unmapped; they are logged here with full detail
/// and surfaced as [`GatewayError::StoreRead`] (500) or
/// [`GatewayError::StoreWrite`] (400).
#[derive(Debug, Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    expose_store_errors: bool,
}

impl PostService {
    /// Creates a new `PostService`.
    ///
    /// With `expose_store_errors` set, raw store failures are attached to
    /// error responses (development mode).
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>, expose_store_errors: bool) -> Self {
        Self {
            store,
            expose_store_errors,
        }
    }

    /// Creates a post directly in the `published` state.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `title` or `content`
    /// is missing or empty, or [`GatewayError::StoreWrite`] on store
    /// failure.
    pub async fn create_published(&self, submission: PostSubmission) -> Result<Post, GatewayError> {
        self.create(submission, PostStatus::Published).await
    }

    /// Creates a post in the `draft` state.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `title` or `content`
    /// is missing or empty, or [`GatewayError::StoreWrite`] on store
    /// failure.
    pub async fn create_draft(&self, submission: PostSubmission) -> Result<Post, GatewayError> {
        self.create(submission, PostStatus::Draft).await
    }

    async fn create(
        &self,
        submission: PostSubmission,
        status: PostStatus,
    ) -> Result<Post, GatewayError> {
        let fields = submission.validate()?;
        let post = self
            .store
            .insert(&fields, status)
            .await
            .map_err(|e| self.write_failure("insert", e))?;

        tracing::info!(post_id = %post.id, %status, "post created");
        Ok(post)
    }

    /// Lists published posts, most recently published first. Unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreRead`] on store failure.
    pub async fn list_published(&self) -> Result<Vec<Post>, GatewayError> {
        self.list(PostStatus::Published).await
    }

    /// Lists drafts, most recently created first. Unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreRead`] on store failure.
    pub async fn list_drafts(&self) -> Result<Vec<Post>, GatewayError> {
        self.list(PostStatus::Draft).await
    }

    async fn list(&self, status: PostStatus) -> Result<Vec<Post>, GatewayError> {
        self.store
            .list_by_status(status)
            .await
            .map_err(|e| self.read_failure("list_by_status", e))
    }

    /// Returns a post regardless of its status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PostNotFound`] if absent, or
    /// [`GatewayError::StoreRead`] on store failure.
    pub async fn get_post(&self, id: PostId) -> Result<Post, GatewayError> {
        self.store
            .find_by_id(id, None)
            .await
            .map_err(|e| self.read_failure("find_by_id", e))?
            .ok_or(GatewayError::PostNotFound(id))
    }

    /// Returns a post only while it is a draft.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DraftNotFound`] if absent or published, or
    /// [`GatewayError::StoreRead`] on store failure.
    pub async fn get_draft(&self, id: PostId) -> Result<Post, GatewayError> {
        self.store
            .find_by_id(id, Some(PostStatus::Draft))
            .await
            .map_err(|e| self.read_failure("find_by_id", e))?
            .ok_or(GatewayError::DraftNotFound(id))
    }

    /// Transitions a post to `published`.
    ///
    /// Has no precondition on the current status: publishing an already
    /// published post succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PostNotFound`] if absent, or
    /// [`GatewayError::StoreWrite`] on store failure.
    pub async fn publish(&self, id: PostId) -> Result<Post, GatewayError> {
        let updated = self
            .store
            .update_status(id, PostStatus::Published)
            .await
            .map_err(|e| self.write_failure("update_status", e))?;

        match updated {
            Some(post) => {
                tracing::info!(post_id = %id, "post published");
                Ok(post)
            }
            None => {
                tracing::warn!(post_id = %id, "publish of missing post");
                Err(GatewayError::PostNotFound(id))
            }
        }
    }

    /// Overwrites title, content, and author of a post in place,
    /// whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] on invalid fields,
    /// [`GatewayError::PostNotFound`] if absent, or
    /// [`GatewayError::StoreWrite`] on store failure.
    pub async fn update_post(
        &self,
        id: PostId,
        submission: PostSubmission,
    ) -> Result<Post, GatewayError> {
        self.update(id, submission, None).await
    }

    /// Overwrites title, content, and author of a draft in place.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] on invalid fields,
    /// [`GatewayError::DraftNotFound`] if absent or published, or
    /// [`GatewayError::StoreWrite`] on store failure.
    pub async fn update_draft(
        &self,
        id: PostId,
        submission: PostSubmission,
    ) -> Result<Post, GatewayError> {
        self.update(id, submission, Some(PostStatus::Draft)).await
    }

    async fn update(
        &self,
        id: PostId,
        submission: PostSubmission,
        scope: Option<PostStatus>,
    ) -> Result<Post, GatewayError> {
        let fields = submission.validate()?;
        let updated = self
            .store
            .update_content(id, &fields, scope)
            .await
            .map_err(|e| self.write_failure("update_content", e))?;

        match updated {
            Some(post) => {
                tracing::info!(post_id = %id, "post edited");
                Ok(post)
            }
            None => {
                tracing::warn!(post_id = %id, scope = ?scope, "edit of missing post");
                Err(not_found(id, scope))
            }
        }
    }

    /// Permanently deletes a post only while it is a draft.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DraftNotFound`] if absent or published (the
    /// row is left untouched), or [`GatewayError::StoreWrite`] on store
    /// failure.
    pub async fn delete_draft(&self, id: PostId) -> Result<(), GatewayError> {
        self.delete(id, Some(PostStatus::Draft)).await
    }

    /// Permanently deletes a post whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PostNotFound`] if absent, or
    /// [`GatewayError::StoreWrite`] on store failure.
    pub async fn delete_post(&self, id: PostId) -> Result<(), GatewayError> {
        self.delete(id, None).await
    }

    async fn delete(&self, id: PostId, scope: Option<PostStatus>) -> Result<(), GatewayError> {
        let affected = self
            .store
            .delete_by_id(id, scope)
            .await
            .map_err(|e| self.write_failure("delete_by_id", e))?;

        if affected == 0 {
            tracing::warn!(post_id = %id, scope = ?scope, "delete of missing post");
            return Err(not_found(id, scope));
        }
        tracing::info!(post_id = %id, scope = ?scope, "post deleted");
        Ok(())
    }

    /// Returns `true` if the store answers a trivial round trip.
    pub async fn store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "store health check failed");
                false
            }
        }
    }

    fn read_failure(&self, operation: &'static str, err: StoreError) -> GatewayError {
        tracing::error!(operation, error = %err, "post store read failed");
        GatewayError::StoreRead {
            details: self.redact(&err),
        }
    }

    fn write_failure(&self, operation: &'static str, err: StoreError) -> GatewayError {
        tracing::error!(operation, error = %err, "post store write failed");
        GatewayError::StoreWrite {
            details: self.redact(&err),
        }
    }

    fn redact(&self, err: &StoreError) -> Option<String> {
        self.expose_store_errors.then(|| err.to_string())
    }
}

fn not_found(id: PostId, scope: Option<PostStatus>) -> GatewayError {
    match scope {
        Some(PostStatus::Draft) => GatewayError::DraftNotFound(id),
        _ => GatewayError::PostNotFound(id),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use async_trait::async_trait;
    use axum::http::StatusCode;

    use super::*;
    use crate::domain::{DEFAULT_AUTHOR, PostFields};
    use crate::persistence::InMemoryPostStore;

    fn make_service() -> PostService {
        PostService::new(Arc::new(InMemoryPostStore::new()), false)
    }

    fn submission(title: &str, content: &str) -> PostSubmission {
        PostSubmission {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            author: None,
        }
    }

    async fn draft(service: &PostService, title: &str) -> Post {
        let Ok(post) = service.create_draft(submission(title, "body")).await else {
            panic!("draft creation failed");
        };
        post
    }

    async fn published(service: &PostService, title: &str) -> Post {
        let Ok(post) = service.create_published(submission(title, "body")).await else {
            panic!("post creation failed");
        };
        post
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = make_service();
        let input = PostSubmission {
            title: Some("Hello".to_string()),
            content: Some("# Heading".to_string()),
            author: Some("ada".to_string()),
        };
        let Ok(created) = service.create_published(input).await else {
            panic!("create failed");
        };
        let Ok(fetched) = service.get_post(created.id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.content, "# Heading");
        assert_eq!(fetched.author, "ada");
        assert_eq!(fetched.status, PostStatus::Published);
        assert!(fetched.publish_date.is_some());
    }

    #[tokio::test]
    async fn missing_author_defaults() {
        let service = make_service();
        let post = published(&service, "t").await;
        assert_eq!(post.author, DEFAULT_AUTHOR);

        let blank = PostSubmission {
            author: Some(String::new()),
            ..submission("t", "c")
        };
        let Ok(post) = service.create_draft(blank).await else {
            panic!("create failed");
        };
        assert_eq!(post.author, DEFAULT_AUTHOR);
    }

    #[tokio::test]
    async fn validation_boundary() {
        let service = make_service();
        for bad in [submission("", "x"), submission("x", "")] {
            let result = service.create_published(bad).await;
            let Err(err) = result else {
                panic!("empty field accepted");
            };
            assert!(matches!(err, GatewayError::InvalidRequest(_)));
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
        assert!(service.create_published(submission("t", "c")).await.is_ok());
    }

    #[tokio::test]
    async fn drafts_stay_out_of_public_listing_until_published() {
        let service = make_service();
        let d = draft(&service, "draft").await;

        let Ok(listed) = service.list_published().await else {
            panic!("list failed");
        };
        assert!(listed.iter().all(|p| p.id != d.id));

        let Ok(drafts) = service.list_drafts().await else {
            panic!("list failed");
        };
        assert!(drafts.iter().any(|p| p.id == d.id));

        let Ok(after) = service.publish(d.id).await else {
            panic!("publish failed");
        };
        assert_eq!(after.status, PostStatus::Published);

        let Ok(listed) = service.list_published().await else {
            panic!("list failed");
        };
        assert!(listed.iter().any(|p| p.id == d.id));
        assert!(matches!(
            service.get_draft(d.id).await,
            Err(GatewayError::DraftNotFound(_))
        ));
    }

    #[tokio::test]
    async fn publish_is_idempotent() {
        let service = make_service();
        let d = draft(&service, "draft").await;

        let Ok(first) = service.publish(d.id).await else {
            panic!("first publish failed");
        };
        let Ok(second) = service.publish(d.id).await else {
            panic!("second publish failed");
        };
        assert_eq!(second.status, PostStatus::Published);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn publish_missing_is_not_found() {
        let service = make_service();
        let Some(id) = PostId::new(404) else {
            panic!("valid id");
        };
        assert!(matches!(
            service.publish(id).await,
            Err(GatewayError::PostNotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_draft_is_scoped_to_drafts() {
        let service = make_service();
        let p = published(&service, "public").await;

        assert!(matches!(
            service.delete_draft(p.id).await,
            Err(GatewayError::DraftNotFound(_))
        ));
        assert!(service.get_post(p.id).await.is_ok());

        assert!(service.delete_post(p.id).await.is_ok());
    }

    #[tokio::test]
    async fn deletion_is_absorbing() {
        let service = make_service();
        let d = draft(&service, "draft").await;
        let p = published(&service, "public").await;

        assert!(service.delete_draft(d.id).await.is_ok());
        assert!(service.delete_post(p.id).await.is_ok());

        for id in [d.id, p.id] {
            assert!(matches!(
                service.get_post(id).await,
                Err(GatewayError::PostNotFound(_))
            ));
            assert!(matches!(
                service.get_draft(id).await,
                Err(GatewayError::DraftNotFound(_))
            ));
            assert!(matches!(
                service.delete_post(id).await,
                Err(GatewayError::PostNotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn published_listing_is_newest_first() {
        let service = make_service();
        let p1 = published(&service, "first").await;
        let p2 = published(&service, "second").await;

        let Ok(listed) = service.list_published().await else {
            panic!("list failed");
        };
        let ids: Vec<PostId> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2.id, p1.id]);
    }

    #[tokio::test]
    async fn edit_keeps_identity_and_status() {
        let service = make_service();
        let p = published(&service, "before").await;

        let Ok(edited) = service.update_post(p.id, submission("after", "new body")).await else {
            panic!("edit failed");
        };
        assert_eq!(edited.id, p.id);
        assert_eq!(edited.title, "after");
        assert_eq!(edited.status, PostStatus::Published);
        assert_eq!(edited.created_at, p.created_at);

        assert!(matches!(
            service.update_draft(p.id, submission("x", "y")).await,
            Err(GatewayError::DraftNotFound(_))
        ));
        assert!(matches!(
            service.update_post(p.id, submission("", "y")).await,
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    /// Store double whose every operation fails.
    #[derive(Debug)]
    struct UnreachableStore;

    fn down() -> StoreError {
        StoreError::Unavailable("connection refused".to_string())
    }

    #[async_trait]
    impl PostStore for UnreachableStore {
        async fn insert(&self, _: &PostFields, _: PostStatus) -> Result<Post, StoreError> {
            Err(down())
        }
        async fn find_by_id(
            &self,
            _: PostId,
            _: Option<PostStatus>,
        ) -> Result<Option<Post>, StoreError> {
            Err(down())
        }
        async fn list_by_status(&self, _: PostStatus) -> Result<Vec<Post>, StoreError> {
            Err(down())
        }
        async fn update_status(
            &self,
            _: PostId,
            _: PostStatus,
        ) -> Result<Option<Post>, StoreError> {
            Err(down())
        }
        async fn update_content(
            &self,
            _: PostId,
            _: &PostFields,
            _: Option<PostStatus>,
        ) -> Result<Option<Post>, StoreError> {
            Err(down())
        }
        async fn delete_by_id(&self, _: PostId, _: Option<PostStatus>) -> Result<u64, StoreError> {
            Err(down())
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Err(down())
        }
    }

    #[tokio::test]
    async fn store_failures_map_by_direction() {
        let service = PostService::new(Arc::new(UnreachableStore), false);
        let Some(id) = PostId::new(1) else {
            panic!("valid id");
        };

        let Err(read) = service.list_published().await else {
            panic!("read should fail");
        };
        assert_eq!(read.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(read, GatewayError::StoreRead { details: None }));

        let Err(write) = service.create_draft(submission("t", "c")).await else {
            panic!("write should fail");
        };
        assert_eq!(write.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(write, GatewayError::StoreWrite { details: None }));

        assert!(matches!(
            service.delete_post(id).await,
            Err(GatewayError::StoreWrite { .. })
        ));
        assert!(matches!(
            service.get_draft(id).await,
            Err(GatewayError::StoreRead { .. })
        ));
        assert!(!service.store_healthy().await);
    }

    #[tokio::test]
    async fn validation_runs_before_store_access() {
        let service = PostService::new(Arc::new(UnreachableStore), false);
        assert!(matches!(
            service.create_published(submission("", "c")).await,
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn development_mode_exposes_store_detail() {
        let service = PostService::new(Arc::new(UnreachableStore), true);
        let Err(GatewayError::StoreRead { details }) = service.list_drafts().await else {
            panic!("read should fail");
        };
        assert_eq!(
            details.as_deref(),
            Some("store unavailable: connection refused")
        );
    }
}
