//! # rn-api
//!
//! The web routing and orchestration layer for rusty-news.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::routing::{delete, get};
use axum::Router;

pub use handlers::AppState;

/// Configures the routes for the news API.
///
/// Unknown paths, and known paths hit with an unsupported method, answer
/// `404 {"msg": "Path not found"}`.
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(handlers::get_endpoints))
        .route("/api/topics", get(handlers::get_topics))
        .route("/api/users", get(handlers::get_users))
        .route("/api/articles", get(handlers::get_articles))
        .route(
            "/api/articles/{article_id}",
            get(handlers::get_article_by_id).patch(handlers::patch_article_by_id),
        )
        .route(
            "/api/articles/{article_id}/comments",
            get(handlers::get_comments_by_article_id).post(handlers::post_comment),
        )
        .route("/api/comments/{comment_id}", delete(handlers::delete_comment_by_id))
        .fallback(handlers::path_not_found)
        .method_not_allowed_fallback(handlers::path_not_found)
        .with_state(state)
}

/// The routes plus the standard middleware stack.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    configure_routes(state)
        .layer(middleware::cors_policy(cors_origins))
        .layer(middleware::trace_layer())
}
