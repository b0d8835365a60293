//! OpenAPI document aggregating every annotated handler.

use utoipa::OpenApi;

use super::dto::MessageResponse;
use super::handlers::{drafts, posts, system};
use crate::domain::{Post, PostId, PostStatus, PostSubmission};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "post-gateway",
        description = "Post lifecycle API: drafts, publishing, and deletion."
    ),
    paths(
        posts::list_published,
        posts::create_post,
        posts::get_post,
        posts::update_post,
        posts::publish_post,
        posts::delete_post,
        drafts::list_drafts,
        drafts::create_draft,
        drafts::get_draft,
        drafts::update_draft,
        drafts::delete_draft,
        system::health_handler,
    ),
    components(schemas(
        Post,
        PostId,
        PostStatus,
        PostSubmission,
        MessageResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Posts", description = "Published posts and lifecycle transitions"),
        (name = "Drafts", description = "Draft-scoped operations"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_lifecycle_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/posts",
            "/api/posts/{id}",
            "/api/posts/{id}/publish",
            "/api/posts/drafts",
            "/api/posts/drafts/{id}",
            "/api/health",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
