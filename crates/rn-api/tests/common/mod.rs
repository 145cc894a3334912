//! Shared fixtures: an in-memory gateway seeded with the reference dataset,
//! and a helper that drives the router with a single request.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use rn_api::{build_app, AppState};
use rn_core::error::{codes, StoreError};
use rn_core::listing::{ArticleListing, SortField, SortOrder};
use rn_core::models::{Article, ArticleComment, ArticleWithCount, Comment, NewComment, Topic, User};
use rn_core::traits::Gateway;
use serde_json::Value;
use tower::ServiceExt;

pub const ARTICLE_COUNT: usize = 13;
pub const TOPIC_COUNT: usize = 3;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    next_comment_id: i32,
}

/// Behaves like the Postgres gateway, including a foreign-key violation code
/// for comments that reference a missing article or user.
pub struct MemoryGateway {
    tables: Mutex<Tables>,
}

impl MemoryGateway {
    pub fn seeded() -> Self {
        let topics = [
            ("mitch", "The man, the Mitch, the legend"),
            ("cats", "Not dogs"),
            ("paper", "what books are made of"),
        ]
        .into_iter()
        .map(|(slug, description)| Topic {
            slug: slug.into(),
            description: description.into(),
        })
        .collect();

        let users = [
            ("butter_bridge", "jonny"),
            ("icellusedkars", "sam"),
            ("rogersop", "paul"),
            ("lurker", "do_nothing"),
        ]
        .into_iter()
        .map(|(username, name)| User {
            username: username.into(),
            name: name.into(),
            avatar_url: format!("https://avatars.example.com/{username}.png"),
        })
        .collect();

        let articles = [
            ("Living in the shadow of a great man", "mitch", "butter_bridge", at(2020, 7, 9, 20, 11), 100),
            ("Sony Vaio; or, The Laptop", "mitch", "icellusedkars", at(2020, 10, 16, 5, 3), 0),
            ("Eight pug gifs that remind me of mitch", "mitch", "icellusedkars", at(2020, 11, 3, 9, 12), 0),
            ("Student SUES Mitch!", "mitch", "rogersop", at(2020, 5, 6, 1, 14), 0),
            ("UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop", at(2020, 8, 3, 13, 14), 0),
            ("A", "mitch", "icellusedkars", at(2020, 10, 18, 1, 0), 0),
            ("Z", "mitch", "icellusedkars", at(2020, 1, 7, 14, 8), 0),
            ("Does Mitch predate civilisation?", "mitch", "icellusedkars", at(2020, 4, 17, 1, 8), 0),
            ("They're not exactly dogs, are they?", "mitch", "butter_bridge", at(2020, 6, 6, 9, 10), 0),
            ("Seven inspirational thought leaders from Manchester UK", "mitch", "rogersop", at(2020, 5, 14, 4, 15), 0),
            ("Am I a cat?", "mitch", "icellusedkars", at(2020, 1, 15, 22, 21), 0),
            ("Moustache", "mitch", "butter_bridge", at(2020, 10, 11, 11, 24), 0),
            ("Another article about Mitch", "mitch", "butter_bridge", at(2020, 10, 11, 12, 24), 0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, topic, author, created_at, votes))| Article {
            article_id: i as i32 + 1,
            title: title.into(),
            body: format!("Body of {title}"),
            topic: topic.into(),
            author: author.into(),
            created_at,
            votes,
        })
        .collect();

        // 11 on article 1, none on article 2.
        let placement: [(i32, &str); 18] = [
            (9, "butter_bridge"),
            (1, "butter_bridge"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (1, "icellusedkars"),
            (3, "icellusedkars"),
            (3, "icellusedkars"),
            (1, "icellusedkars"),
            (5, "icellusedkars"),
            (1, "butter_bridge"),
            (5, "butter_bridge"),
            (6, "butter_bridge"),
            (9, "icellusedkars"),
        ];
        let comments = placement
            .into_iter()
            .enumerate()
            .map(|(i, (article_id, author))| Comment {
                comment_id: i as i32 + 1,
                article_id,
                author: author.into(),
                body: format!("Comment number {}", i + 1),
                votes: 0,
                created_at: at(2020, 3, 1, 0, 0) + chrono::Duration::hours(i as i64 * 7),
            })
            .collect();

        Self {
            tables: Mutex::new(Tables {
                topics,
                users,
                articles,
                comments,
                next_comment_id: 19,
            }),
        }
    }

    pub fn article_votes(&self, article_id: i32) -> Option<i32> {
        let tables = self.tables.lock().unwrap();
        tables
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|a| a.votes)
    }

    fn with_count(tables: &Tables, article: &Article) -> ArticleWithCount {
        let count = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article.article_id)
            .count();
        ArticleWithCount {
            article: article.clone(),
            comment_count: count.to_string(),
        }
    }
}

fn compare(field: SortField, a: &ArticleWithCount, b: &ArticleWithCount) -> Ordering {
    match field {
        SortField::Author => a.article.author.cmp(&b.article.author),
        SortField::Title => a.article.title.cmp(&b.article.title),
        SortField::ArticleId => a.article.article_id.cmp(&b.article.article_id),
        SortField::Topic => a.article.topic.cmp(&b.article.topic),
        SortField::CreatedAt => a.article.created_at.cmp(&b.article.created_at),
        SortField::Votes => a.article.votes.cmp(&b.article.votes),
        SortField::CommentCount => {
            let count = |x: &ArticleWithCount| x.comment_count.parse::<u64>().unwrap_or(0);
            count(a).cmp(&count(b))
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn select_topics(&self) -> Result<Vec<Topic>, StoreError> {
        Ok(self.tables.lock().unwrap().topics.clone())
    }

    async fn select_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.tables.lock().unwrap().topics.iter().any(|t| t.slug == slug))
    }

    async fn article_exists(&self, article_id: i32) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .articles
            .iter()
            .any(|a| a.article_id == article_id))
    }

    async fn select_articles(&self, listing: &ArticleListing) -> Result<Vec<ArticleWithCount>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<ArticleWithCount> = tables
            .articles
            .iter()
            .filter(|a| listing.topic().map_or(true, |t| a.topic == t))
            .map(|a| Self::with_count(&tables, a))
            .collect();
        rows.sort_by(|a, b| {
            let ordering = compare(listing.sort_by(), a, b);
            match listing.order() {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(rows)
    }

    async fn select_article(&self, article_id: i32) -> Result<Option<ArticleWithCount>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|a| Self::with_count(&tables, a)))
    }

    async fn increment_votes(&self, article_id: i32, delta: i32) -> Result<Option<Article>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(article) = tables.articles.iter_mut().find(|a| a.article_id == article_id) else {
            return Ok(None);
        };
        article.votes = article.votes.checked_add(delta).ok_or_else(|| {
            StoreError::with_code(codes::NUMERIC_VALUE_OUT_OF_RANGE, "integer out of range")
        })?;
        Ok(Some(article.clone()))
    }

    async fn select_comments(&self, article_id: i32) -> Result<Vec<ArticleComment>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments.into_iter().map(ArticleComment::from).collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let article_known = tables.articles.iter().any(|a| a.article_id == comment.article_id);
        let author_known = tables.users.iter().any(|u| u.username == comment.author);
        if !article_known || !author_known {
            return Err(StoreError::with_code(
                codes::FOREIGN_KEY_VIOLATION,
                "insert or update on table \"comments\" violates foreign key constraint",
            ));
        }

        let created = Comment {
            comment_id: tables.next_comment_id,
            article_id: comment.article_id,
            author: comment.author,
            body: comment.body,
            votes: 0,
            created_at: Utc::now(),
        };
        tables.next_comment_id += 1;
        tables.comments.push(created.clone());
        Ok(created)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.comment_id != comment_id);
        Ok((before - tables.comments.len()) as u64)
    }
}

pub fn app_with(gateway: Arc<dyn Gateway>) -> Router {
    build_app(AppState::new(gateway), &[])
}

pub fn app() -> (Router, Arc<MemoryGateway>) {
    let gateway = Arc::new(MemoryGateway::seeded());
    (app_with(gateway.clone()), gateway)
}

/// Sends one request; the body is parsed as JSON when there is one.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}
