//! # Article Listing Query Builder
//!
//! Validates the `sort_by` / `order` / `topic` query parameters and renders
//! the aggregate listing query. Sort column and direction are identifiers and
//! keywords, so they cannot be bound; they are only ever taken from the fixed
//! tables below, after an exact whitelist match. The topic is always bound as
//! `$1`.

use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Projection shared by the listing and the single-article read. The LEFT
/// JOIN keeps articles with no comments (count `"0"`).
macro_rules! select_with_count {
    () => {
        "SELECT articles.article_id, articles.title, articles.body, articles.topic, \
         articles.author, articles.created_at, articles.votes, \
         COUNT(comments.comment_id)::TEXT AS comment_count \
         FROM articles \
         LEFT JOIN comments ON comments.article_id = articles.article_id"
    };
}

/// Single article with its comment count, `$1` = article_id.
pub const ARTICLE_BY_ID_SQL: &str = concat!(
    select_with_count!(),
    " WHERE articles.article_id = $1 GROUP BY articles.article_id"
);

/// Columns an article listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Author,
    Title,
    ArticleId,
    Topic,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Author,
        SortField::Title,
        SortField::ArticleId,
        SortField::Topic,
        SortField::CreatedAt,
        SortField::Votes,
        SortField::CommentCount,
    ];

    /// Query-string spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Author => "author",
            SortField::Title => "title",
            SortField::ArticleId => "article_id",
            SortField::Topic => "topic",
            SortField::CreatedAt => "created_at",
            SortField::Votes => "votes",
            SortField::CommentCount => "comment_count",
        }
    }

    /// Expression placed in ORDER BY. The count is ordered numerically, not
    /// by its text projection.
    fn order_expr(self) -> &'static str {
        match self {
            SortField::Author => "articles.author",
            SortField::Title => "articles.title",
            SortField::ArticleId => "articles.article_id",
            SortField::Topic => "articles.topic",
            SortField::CreatedAt => "articles.created_at",
            SortField::Votes => "articles.votes",
            SortField::CommentCount => "COUNT(comments.comment_id)",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AppError::InvalidSortField(s.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    /// Case-insensitive: `asc`, `ASC` and `Asc` are all accepted.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(AppError::InvalidSortOrder(s.to_string()))
        }
    }
}

/// A validated article listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleListing {
    sort_by: SortField,
    order: SortOrder,
    topic: Option<String>,
}

impl ArticleListing {
    /// Validates raw query parameters. `sort_by` is checked before `order`;
    /// an empty `topic` means no filter.
    pub fn parse(sort_by: Option<&str>, order: Option<&str>, topic: Option<&str>) -> Result<Self> {
        let sort_by = sort_by.map(str::parse::<SortField>).transpose()?.unwrap_or_default();
        let order = order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
        let topic = topic.filter(|t| !t.is_empty()).map(str::to_string);
        Ok(Self {
            sort_by,
            order,
            topic,
        })
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Topic filter, bound as `$1` in [`ArticleListing::sql`] when present.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Renders the listing query.
    pub fn sql(&self) -> String {
        let filter = if self.topic.is_some() {
            " WHERE articles.topic = $1"
        } else {
            ""
        };
        format!(
            "{}{} GROUP BY articles.article_id ORDER BY {} {}",
            select_with_count!(),
            filter,
            self.sort_by.order_expr(),
            self.order.keyword(),
        )
    }
}
