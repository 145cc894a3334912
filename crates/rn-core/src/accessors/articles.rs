use tracing::debug;

use crate::error::{AppError, Result};
use crate::listing::ArticleListing;
use crate::models::{Article, ArticleWithCount};
use crate::traits::Gateway;

pub const MSG_TOPIC_NOT_FOUND: &str = "topic not found on articles table";

fn article_not_found(article_id: i32) -> AppError {
    AppError::NotFound(format!("No article found for article_id: {article_id}"))
}

/// Lists articles for an already validated listing. A topic filter naming an
/// unknown topic is a NotFound, not an empty list.
pub async fn fetch_articles(
    gateway: &dyn Gateway,
    listing: &ArticleListing,
) -> Result<Vec<ArticleWithCount>> {
    if let Some(topic) = listing.topic() {
        if !gateway.topic_exists(topic).await? {
            return Err(AppError::NotFound(MSG_TOPIC_NOT_FOUND.to_string()));
        }
    }
    debug!(sort_by = %listing.sort_by(), order = ?listing.order(), topic = ?listing.topic(), "listing articles");
    Ok(gateway.select_articles(listing).await?)
}

pub async fn fetch_article_by_id(gateway: &dyn Gateway, article_id: i32) -> Result<ArticleWithCount> {
    gateway
        .select_article(article_id)
        .await?
        .ok_or_else(|| article_not_found(article_id))
}

/// Applies `votes += inc_votes` and returns the updated row. A missing
/// `inc_votes` is rejected rather than treated as zero.
pub async fn update_article_by_id(
    gateway: &dyn Gateway,
    article_id: i32,
    inc_votes: Option<i32>,
) -> Result<Article> {
    let delta = inc_votes.ok_or_else(|| AppError::MalformedBody("inc_votes is required".into()))?;
    gateway
        .increment_votes(article_id, delta)
        .await?
        .ok_or_else(|| article_not_found(article_id))
}
