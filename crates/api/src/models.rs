//! Response shapes that combine more than one record.

use chrono::{DateTime, Utc};
use northwind_core::{ArticleId, BlogArticle, Employee, EmployeeId};
use serde::Serialize;

/// One row of the article listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleShortInfo {
    pub id: ArticleId,
    pub title: String,
    pub posted: DateTime<Utc>,
    pub author_id: EmployeeId,
    pub author_name: String,
}

impl ArticleShortInfo {
    #[must_use]
    pub fn new(article: BlogArticle, author: &Employee) -> Self {
        Self {
            id: article.id,
            title: article.title,
            posted: article.posted,
            author_id: article.author_id,
            author_name: author.display_name(),
        }
    }
}

/// A single article with its text.
///
/// `author_name` is `None` when the author employee no longer exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFullInfo {
    pub id: ArticleId,
    pub title: String,
    pub text: String,
    pub posted: DateTime<Utc>,
    pub author_id: EmployeeId,
    pub author_name: Option<String>,
}

impl ArticleFullInfo {
    #[must_use]
    pub fn new(article: BlogArticle, author: Option<&Employee>) -> Self {
        Self {
            id: article.id,
            title: article.title,
            text: article.text,
            posted: article.posted,
            author_id: article.author_id,
            author_name: author.map(Employee::display_name),
        }
    }
}
