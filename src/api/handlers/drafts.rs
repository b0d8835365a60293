//! Draft handlers. Every lookup here is scoped to `status = draft`: a
//! published post reached through these paths is reported as not found.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::MessageResponse;
use crate::app_state::AppState;
use crate::domain::{Post, PostId, PostSubmission};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /posts/drafts` — List drafts.
///
/// # Errors
///
/// Returns [`GatewayError::StoreRead`] on store failure.
#[utoipa::path(
    get,
    path = "/api/posts/drafts",
    tag = "Drafts",
    summary = "List drafts",
    description = "Returns every draft, most recently created first. Not paginated.",
    responses(
        (status = 200, description = "Drafts", body = Vec<Post>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_drafts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let drafts = state.post_service.list_drafts().await?;
    Ok(Json(drafts))
}

/// `POST /posts/drafts` — Save a new draft.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input or store failure.
#[utoipa::path(
    post,
    path = "/api/posts/drafts",
    tag = "Drafts",
    summary = "Save a draft",
    description = "Creates a post in the draft state. `author` defaults to \"anonymous\".",
    request_body = PostSubmission,
    responses(
        (status = 201, description = "Draft created", body = Post),
        (status = 400, description = "Missing field or store failure", body = ErrorResponse),
    )
)]
pub async fn create_draft(
    State(state): State<AppState>,
    payload: Result<Json<PostSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(submission) = payload?;
    let draft = state.post_service.create_draft(submission).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// `GET /posts/drafts/:id` — Get a draft.
///
/// # Errors
///
/// Returns [`GatewayError::DraftNotFound`] if no draft has that id.
#[utoipa::path(
    get,
    path = "/api/posts/drafts/{id}",
    tag = "Drafts",
    summary = "Get a draft",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Draft", body = Post),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn get_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    let draft = state.post_service.get_draft(id).await?;
    Ok(Json(draft))
}

/// `PUT /posts/drafts/:id` — Edit a draft in place.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input, missing draft, or store
/// failure.
#[utoipa::path(
    put,
    path = "/api/posts/drafts/{id}",
    tag = "Drafts",
    summary = "Edit a draft",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    request_body = PostSubmission,
    responses(
        (status = 200, description = "Updated draft", body = Post),
        (status = 400, description = "Invalid input or store failure", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PostSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    let Json(submission) = payload?;
    let draft = state.post_service.update_draft(id, submission).await?;
    Ok(Json(draft))
}

/// `DELETE /posts/drafts/:id` — Delete a draft.
///
/// # Errors
///
/// Returns [`GatewayError::DraftNotFound`] if no draft has that id; a
/// published post with the id is left untouched.
#[utoipa::path(
    delete,
    path = "/api/posts/drafts/{id}",
    tag = "Drafts",
    summary = "Delete a draft",
    params(
        ("id" = i64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Draft deleted", body = MessageResponse),
        (status = 400, description = "Invalid id or store failure", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn delete_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id: PostId = id.parse()?;
    state.post_service.delete_draft(id).await?;
    Ok(Json(MessageResponse::new("draft deleted")))
}

/// Draft routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts/drafts", get(list_drafts).post(create_draft))
        .route(
            "/posts/drafts/{id}",
            get(get_draft).put(update_draft).delete(delete_draft),
        )
}
