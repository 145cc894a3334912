//! # rn-db-postgres Implementation
//!
//! This module implements the record store gateway over a Postgres pool and
//! the data mapping between rows and the `rn-core` domain models.

use async_trait::async_trait;
use rn_core::error::StoreError;
use rn_core::listing::{ArticleListing, ARTICLE_BY_ID_SQL};
use rn_core::models::{Article, ArticleComment, ArticleWithCount, Comment, NewComment, Topic, User};
use rn_core::traits::Gateway;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    /// Opens a pool against `url`. Connections are established lazily up to
    /// `max_connections`; the first one is opened eagerly to fail fast.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(store_error)?;
        tracing::info!(max_connections, "postgres pool ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for checked-out connections to be returned, then closes them.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("postgres pool closed");
    }
}

/// Keeps the SQLSTATE so the translator can classify constraint failures.
fn store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => StoreError::with_code(code, db.message()),
            None => StoreError::new(db.message()),
        },
        _ => StoreError::new(err.to_string()),
    }
}

// Row mappers

fn topic_from_row(row: &PgRow) -> sqlx::Result<Topic> {
    Ok(Topic {
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
    })
}

fn user_from_row(row: &PgRow) -> sqlx::Result<User> {
    Ok(User {
        username: row.try_get("username")?,
        name: row.try_get("name")?,
        avatar_url: row.try_get("avatar_url")?,
    })
}

fn article_from_row(row: &PgRow) -> sqlx::Result<Article> {
    Ok(Article {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes")?,
    })
}

fn article_with_count_from_row(row: &PgRow) -> sqlx::Result<ArticleWithCount> {
    Ok(ArticleWithCount {
        article: article_from_row(row)?,
        comment_count: row.try_get("comment_count")?,
    })
}

fn article_comment_from_row(row: &PgRow) -> sqlx::Result<ArticleComment> {
    Ok(ArticleComment {
        comment_id: row.try_get("comment_id")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes")?,
    })
}

fn comment_from_row(row: &PgRow) -> sqlx::Result<Comment> {
    Ok(Comment {
        comment_id: row.try_get("comment_id")?,
        article_id: row.try_get("article_id")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        votes: row.try_get("votes")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Maps every row or fails as a whole; a listing is never partial.
fn map_rows<T>(rows: Vec<PgRow>, map: fn(&PgRow) -> sqlx::Result<T>) -> Result<Vec<T>, StoreError> {
    rows.iter().map(map).collect::<sqlx::Result<_>>().map_err(store_error)
}

#[async_trait]
impl Gateway for PgGateway {
    async fn select_topics(&self) -> Result<Vec<Topic>, StoreError> {
        let rows = sqlx::query("SELECT slug, description FROM topics")
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        map_rows(rows, topic_from_row)
    }

    async fn select_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query("SELECT username, name, avatar_url FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        map_rows(rows, user_from_row)
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM topics WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn article_exists(&self, article_id: i32) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM articles WHERE article_id = $1)")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn select_articles(&self, listing: &ArticleListing) -> Result<Vec<ArticleWithCount>, StoreError> {
        let sql = listing.sql();
        let mut query = sqlx::query(&sql);
        if let Some(topic) = listing.topic() {
            query = query.bind(topic);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(store_error)?;
        map_rows(rows, article_with_count_from_row)
    }

    async fn select_article(&self, article_id: i32) -> Result<Option<ArticleWithCount>, StoreError> {
        let row = sqlx::query(ARTICLE_BY_ID_SQL)
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        row.as_ref()
            .map(article_with_count_from_row)
            .transpose()
            .map_err(store_error)
    }

    /// Single statement: the increment and the returned row cannot be split
    /// by a concurrent update.
    async fn increment_votes(&self, article_id: i32, delta: i32) -> Result<Option<Article>, StoreError> {
        let row = sqlx::query(
            "UPDATE articles SET votes = votes + $2 WHERE article_id = $1 \
             RETURNING article_id, title, body, topic, author, created_at, votes",
        )
        .bind(article_id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        row.as_ref().map(article_from_row).transpose().map_err(store_error)
    }

    async fn select_comments(&self, article_id: i32) -> Result<Vec<ArticleComment>, StoreError> {
        let rows = sqlx::query(
            "SELECT comment_id, author, body, created_at, votes FROM comments \
             WHERE article_id = $1 ORDER BY created_at DESC",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        map_rows(rows, article_comment_from_row)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let row = sqlx::query(
            "INSERT INTO comments (article_id, author, body) VALUES ($1, $2, $3) \
             RETURNING comment_id, article_id, author, body, votes, created_at",
        )
        .bind(comment.article_id)
        .bind(comment.author)
        .bind(comment.body)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        comment_from_row(&row).map_err(store_error)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected())
    }
}
