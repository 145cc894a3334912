//! # rn-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! accessors. Handlers only extract, call one accessor and shape the body.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use rn_core::accessors::{articles, comments, parse_id, topics, users};
use rn_core::error::AppError;
use rn_core::listing::ArticleListing;
use rn_core::models::{Article, ArticleComment, ArticleWithCount, Comment, Topic, User};
use rn_core::traits::Gateway;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Endpoint documentation served at `GET /api`.
pub const ENDPOINTS_JSON: &str = include_str!("../endpoints.json");

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchArticleBody {
    pub inc_votes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct PostCommentBody {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleWithCount>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse<T> {
    pub article: T,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<ArticleComment>,
}

#[derive(Debug, Serialize)]
pub struct PostedCommentResponse {
    #[serde(rename = "postedComment")]
    pub posted_comment: Comment,
}

fn id_from_path(path: Result<Path<String>, PathRejection>) -> ApiResult<i32> {
    let Path(raw) = path?;
    Ok(parse_id(&raw)?)
}

// ==================
// Handlers
// ==================

pub async fn get_endpoints() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], ENDPOINTS_JSON)
}

pub async fn get_topics(State(state): State<AppState>) -> ApiResult<Json<Vec<Topic>>> {
    Ok(Json(topics::fetch_topics(state.gateway.as_ref()).await?))
}

pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<UsersResponse>> {
    let users = users::fetch_users(state.gateway.as_ref()).await?;
    Ok(Json(UsersResponse { users }))
}

/// Sort parameters are validated before the topic is looked up.
pub async fn get_articles(
    State(state): State<AppState>,
    query: Result<Query<ArticlesQuery>, QueryRejection>,
) -> ApiResult<Json<ArticlesResponse>> {
    let Query(q) = query?;
    let listing = ArticleListing::parse(q.sort_by.as_deref(), q.order.as_deref(), q.topic.as_deref())?;
    let articles = articles::fetch_articles(state.gateway.as_ref(), &listing).await?;
    Ok(Json(ArticlesResponse { articles }))
}

pub async fn get_article_by_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ArticleResponse<ArticleWithCount>>> {
    let article_id = id_from_path(path)?;
    let article = articles::fetch_article_by_id(state.gateway.as_ref(), article_id).await?;
    Ok(Json(ArticleResponse { article }))
}

pub async fn patch_article_by_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<PatchArticleBody>, JsonRejection>,
) -> ApiResult<Json<ArticleResponse<Article>>> {
    let article_id = id_from_path(path)?;
    let Json(body) = body?;
    let article = articles::update_article_by_id(state.gateway.as_ref(), article_id, body.inc_votes).await?;
    Ok(Json(ArticleResponse { article }))
}

pub async fn get_comments_by_article_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<CommentsResponse>> {
    let article_id = id_from_path(path)?;
    let comments = comments::fetch_comments_by_article_id(state.gateway.as_ref(), article_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

pub async fn post_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<PostCommentBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PostedCommentResponse>)> {
    let article_id = id_from_path(path)?;
    let Json(body) = body?;
    let posted_comment =
        comments::insert_comment(state.gateway.as_ref(), article_id, body.username, body.body).await?;
    Ok((StatusCode::CREATED, Json(PostedCommentResponse { posted_comment })))
}

pub async fn delete_comment_by_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let comment_id = id_from_path(path)?;
    comments::remove_comment_by_id(state.gateway.as_ref(), comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Catch-all for unknown paths and unsupported methods.
pub async fn path_not_found() -> ApiError {
    ApiError(AppError::NotFound("Path not found".to_string()))
}
