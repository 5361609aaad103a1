use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::comments::CommentService;
use crate::app::export::{ExportService, ARCHIVE_FILE_NAME};
use crate::app::posts::PostService;
use crate::domain::comment::Comment;
use crate::domain::post::{Post, PostDraft, PostPatch};
use crate::http::AppError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub id: Uuid,
    pub message: &'static str,
}

fn post_service(state: &AppState) -> PostService {
    PostService::new(state.posts.clone(), state.comments.clone(), state.page_size)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let posts = state.posts.read().await.is_ok();
    let comments = state.comments.read().await.is_ok();
    let status = if posts && comments { "ok" } else { "degraded" };

    Json(HealthResponse { status })
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Reads the leading digits of `page` (`2abc` is page 2). Absent,
    /// non-numeric or non-positive pages fall back to the first page.
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .map(|raw| {
                let raw = raw.trim_start();
                raw.strip_prefix('+').unwrap_or(raw)
            })
            .and_then(|raw| {
                let rest = raw.trim_start_matches(|ch: char| ch.is_ascii_digit());
                let digits = raw.len() - rest.len();
                raw[..digits].parse::<usize>().ok()
            })
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = post_service(&state)
        .list_page(query.page())
        .await
        .map_err(|err| AppError::from_store(err, "list posts"))?;

    Ok(Json(posts))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = post_service(&state)
        .search(query.q.as_deref().unwrap_or(""))
        .await
        .map_err(|err| AppError::from_store(err, "search posts"))?;

    Ok(Json(posts))
}

pub async fn get_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    let post = post_service(&state)
        .get_post(id)
        .await
        .map_err(|err| AppError::from_store(err, "fetch post"))?;

    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let draft = json_body(payload)?;
    let post = post_service(&state)
        .create_post(draft)
        .await
        .map_err(|err| AppError::from_store(err, "create post"))?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<PostPatch>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let patch = json_body(payload)?;
    let post = post_service(&state)
        .update_post(id, patch)
        .await
        .map_err(|err| AppError::from_store(err, "update post"))?;

    Ok(Json(post))
}

pub async fn toggle_bookmark(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    let post = post_service(&state)
        .toggle_bookmark(id)
        .await
        .map_err(|err| AppError::from_store(err, "toggle bookmark"))?;

    Ok(Json(post))
}

pub async fn delete_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = post_service(&state)
        .delete_post(id)
        .await
        .map_err(|err| AppError::from_store(err, "delete post"))?;

    Ok(Json(DeletedResponse {
        id,
        message: "Post deleted",
    }))
}

pub async fn export_posts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let archive = ExportService::new(state.posts.clone())
        .export_archive()
        .await
        .map_err(|err| AppError::from_store(err, "export posts"))?;

    let disposition = format!("attachment; filename=\"{}\"", ARCHIVE_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive,
    ))
}

pub async fn list_post_comments(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = CommentService::new(state.comments.clone())
        .list_for_post(id)
        .await
        .map_err(|err| AppError::from_store(err, "list comments"))?;

    Ok(Json(comments))
}

#[derive(Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

pub async fn comment_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let request = json_body(payload)?;
    let comment = CommentService::new(state.comments.clone())
        .create_comment(id, request.author, request.content)
        .await
        .map_err(|err| AppError::from_store(err, "create comment"))?;

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    Path(comment_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = CommentService::new(state.comments.clone())
        .delete_comment(comment_id)
        .await
        .map_err(|err| AppError::from_store(err, "delete comment"))?;

    Ok(Json(DeletedResponse {
        id,
        message: "Comment deleted",
    }))
}
