//! # Domain Models
//!
//! These structs represent the entities of the news dataset.
//! Identifiers are the integer keys assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subject articles are filed under (e.g., "coding", "football").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier, also used as the article `topic` value
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// An article row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub body: String,
    /// References `Topic::slug`
    pub topic: String,
    /// References `User::username`
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Signed, no floor or ceiling
    pub votes: i32,
}

/// An article together with its aggregated comment count.
///
/// Only produced by the listing and detail reads; the count is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleWithCount {
    #[serde(flatten)]
    pub article: Article,
    /// Serialized as a string, the way the store returns aggregates
    pub comment_count: String,
}

/// A comment row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

/// A comment as listed under its article (the `article_id` is implied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleComment {
    pub comment_id: i32,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
}

impl From<Comment> for ArticleComment {
    fn from(c: Comment) -> Self {
        Self {
            comment_id: c.comment_id,
            author: c.author,
            body: c.body,
            created_at: c.created_at,
            votes: c.votes,
        }
    }
}

/// Insert payload for a comment. `votes` and `created_at` are store defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
}
