//! Post handlers: public listing, create, get, edit, publish, delete.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::api::dto::MessageResponse;
use crate::app_state::AppState;
use crate::domain::{Post, PostId, PostSubmission};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /posts` — List published posts.
///
/// # Errors
///
/// Returns [`GatewayError::StoreRead`] on store failure.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    summary = "List published posts",
    description = "Returns every published post, most recently published first. Not paginated.",
    responses(
        (status = 200, description = "Published posts", body = Vec<Post>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_published(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let posts = state.post_service.list_published().await?;
    Ok(Json(posts))
}

/// `POST /posts` — Create a published post.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input or store failure.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    summary = "Create a published post",
    description = "Creates a post directly in the published state. `author` defaults to \"anonymous\".",
    request_body = PostSubmission,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Missing field or store failure", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(submission) = payload?;
    let post = state.post_service.create_published(submission).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /posts/:id` — Get a post in any state.
///
/// # Errors
///
/// Returns [`GatewayError::PostNotFound`] if the post does not exist.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Get a post",
    description = "Returns a single post regardless of its status.",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    let post = state.post_service.get_post(id).await?;
    Ok(Json(post))
}

/// `PUT /posts/:id` — Edit a post in place.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input, missing post, or store
/// failure.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Edit a post",
    description = "Overwrites title, content, and author. Status and timestamps are unchanged.",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    request_body = PostSubmission,
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 400, description = "Invalid input or store failure", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PostSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    let Json(submission) = payload?;
    let post = state.post_service.update_post(id, submission).await?;
    Ok(Json(post))
}

/// `PATCH /posts/:id/publish` — Publish a post.
///
/// # Errors
///
/// Returns [`GatewayError::PostNotFound`] if the post does not exist.
#[utoipa::path(
    patch,
    path = "/api/posts/{id}/publish",
    tag = "Posts",
    summary = "Publish a post",
    description = "Moves a post to the published state. Publishing an already published post is a no-op.",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Published post", body = Post),
        (status = 400, description = "Invalid id or store failure", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn publish_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    let post = state.post_service.publish(id).await?;
    Ok(Json(post))
}

/// `DELETE /posts/:id` — Delete a post in any state.
///
/// # Errors
///
/// Returns [`GatewayError::PostNotFound`] if the post does not exist.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Delete a post",
    description = "Permanently deletes a post regardless of its status.",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 400, description = "Invalid id or store failure", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    state.post_service.delete_post(id).await?;
    Ok(Json(MessageResponse::new("post deleted")))
}

/// Post routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_published).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{id}/publish", patch(publish_post))
}
