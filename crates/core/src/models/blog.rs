//! Blog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::types::{ArticleId, ArticleProductId, CommentId, EmployeeId, ProductId};
use crate::validate;

/// Maximum title length (`nvarchar(50)` in the blogging schema).
pub const MAX_TITLE_CHARS: usize = 50;

/// A blog article written by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogArticle {
    #[serde(default)]
    pub id: ArticleId,
    pub title: String,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub posted: DateTime<Utc>,
    pub author_id: EmployeeId,
}

impl BlogArticle {
    /// Check the fields a store refuses to persist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if the title is blank or too
    /// long, the text is blank, or the author id is not positive.
    pub fn validate(&self) -> ServiceResult<()> {
        validate::required("title", &self.title)?;
        validate::max_chars("title", &self.title, MAX_TITLE_CHARS)?;
        validate::required("text", &self.text)?;
        validate::id("author id", self.author_id)
    }

    /// Copy the editable fields from `other`. Authorship never changes.
    pub fn overwrite_with(&mut self, other: Self) {
        self.title = other.title;
        self.text = other.text;
        self.posted = other.posted;
    }
}

/// A comment on a blog article.
///
/// `author_id` is the identity of whoever wrote it, usually a customer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogComment {
    #[serde(default)]
    pub id: CommentId,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub posted: DateTime<Utc>,
    pub author_id: String,
    pub article_id: ArticleId,
}

impl BlogComment {
    /// Check the fields a store refuses to persist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if the text or author is blank,
    /// or the article id is not positive.
    pub fn validate(&self) -> ServiceResult<()> {
        validate::required("text", &self.text)?;
        validate::required("author id", &self.author_id)?;
        validate::id("article id", self.article_id)
    }

    /// Copy the editable fields from `other`.
    pub fn overwrite_with(&mut self, other: Self) {
        self.text = other.text;
        self.posted = other.posted;
    }
}

/// Link between an article and a product it mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogArticleProduct {
    #[serde(default)]
    pub id: ArticleProductId,
    pub article_id: ArticleId,
    pub product_id: ProductId,
}
