use crate::domain::article::Article;
use crate::domain::slug::{Slug, SlugInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub previous_slugs: Vec<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into(),
            body: article.body.into(),
            slug: article.slug.current.map(Slug::into_inner),
            previous_slugs: article.slug.history.into_iter().map(Slug::into_inner).collect(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugHistoryDto {
    pub article_id: i64,
    pub current: Option<String>,
    /// Oldest first.
    pub history: Vec<String>,
}

impl SlugHistoryDto {
    pub fn new(article_id: i64, info: SlugInfo) -> Self {
        Self {
            article_id,
            current: info.current.map(Slug::into_inner),
            history: info.history.into_iter().map(Slug::into_inner).collect(),
        }
    }
}
