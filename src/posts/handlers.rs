use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreatePostBody, DeleteConfirmation, ListQuery, PostResponse, UpdatePostBody};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let db = state.store.handle().await?;
    let posts = repo::list(&db, query.user_id.as_deref()).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state, body))]
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostBody>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let user_id = require_non_blank(body.user_id, "userId")?;
    let content = require_non_blank(body.content, "content")?;

    let db = state.store.handle().await?;
    let post = repo::insert(&db, user_id, content).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[instrument(skip(state, body))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePostBody>,
) -> Result<Json<PostResponse>, ApiError> {
    // Validate before any store access.
    let content = require_non_blank(body.content, "content")?;
    let id = parse_object_id(&id)?;

    let db = state.store.handle().await?;
    let post = repo::update_content(&db, id, &content)
        .await?
        .ok_or_else(post_not_found)?;
    Ok(Json(post.into()))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    let id = parse_object_id(&id)?;

    let db = state.store.handle().await?;
    repo::delete(&db, id).await?.ok_or_else(post_not_found)?;
    Ok(Json(DeleteConfirmation {
        message: "Post deleted successfully",
    }))
}

fn require_non_blank(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}

// An id that does not parse cannot name any stored post.
fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| post_not_found())
}

fn post_not_found() -> ApiError {
    ApiError::NotFound("Post not found".into())
}
