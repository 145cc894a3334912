//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::listing::ArticleListing;
use crate::models::{Article, ArticleComment, ArticleWithCount, Comment, NewComment, Topic, User};

/// Record store contract: one method per primitive operation.
///
/// Implementations execute parameterized queries and return rows or a
/// well-defined empty result. They never translate failures; driver error
/// codes travel up inside [`StoreError`].
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    // Lookups
    async fn select_topics(&self) -> Result<Vec<Topic>, StoreError>;
    async fn select_users(&self) -> Result<Vec<User>, StoreError>;
    async fn topic_exists(&self, slug: &str) -> Result<bool, StoreError>;

    // Article Operations
    async fn article_exists(&self, article_id: i32) -> Result<bool, StoreError>;
    /// Runs [`ArticleListing::sql`], binding the topic when present.
    async fn select_articles(&self, listing: &ArticleListing) -> Result<Vec<ArticleWithCount>, StoreError>;
    async fn select_article(&self, article_id: i32) -> Result<Option<ArticleWithCount>, StoreError>;
    /// `votes = votes + delta` in a single update-returning statement.
    /// `None` when no row has that id.
    async fn increment_votes(&self, article_id: i32, delta: i32) -> Result<Option<Article>, StoreError>;

    // Comment Operations
    async fn select_comments(&self, article_id: i32) -> Result<Vec<ArticleComment>, StoreError>;
    /// Insert-returning. Dangling `article_id` / `author` surface as a
    /// foreign-key violation code from the store.
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;
    /// Returns the number of rows removed.
    async fn delete_comment(&self, comment_id: i32) -> Result<u64, StoreError>;
}
