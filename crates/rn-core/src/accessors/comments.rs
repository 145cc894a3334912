use crate::error::{AppError, Result};
use crate::models::{ArticleComment, Comment, NewComment};
use crate::traits::Gateway;

/// Comments for an article, newest first.
///
/// Existence is checked separately so that an article without comments
/// yields an empty list while an absent article yields NotFound.
pub async fn fetch_comments_by_article_id(
    gateway: &dyn Gateway,
    article_id: i32,
) -> Result<Vec<ArticleComment>> {
    if !gateway.article_exists(article_id).await? {
        return Err(AppError::NotFound(format!(
            "No article found for article_id: {article_id}"
        )));
    }
    Ok(gateway.select_comments(article_id).await?)
}

/// Creates a comment. Only presence is checked here; whether the article and
/// the author exist is left to the store's referential constraints.
pub async fn insert_comment(
    gateway: &dyn Gateway,
    article_id: i32,
    author: Option<String>,
    body: Option<String>,
) -> Result<Comment> {
    let author = author.ok_or_else(|| AppError::MalformedBody("username is required".into()))?;
    let body = body
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::MalformedBody("body must not be empty".into()))?;

    Ok(gateway
        .insert_comment(NewComment {
            article_id,
            author,
            body,
        })
        .await?)
}

pub async fn remove_comment_by_id(gateway: &dyn Gateway, comment_id: i32) -> Result<()> {
    match gateway.delete_comment(comment_id).await? {
        0 => Err(AppError::NotFound(format!(
            "No comment found for comment_id: {comment_id}"
        ))),
        _ => Ok(()),
    }
}
