// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleBody, ArticleId, ArticleTitle};
use crate::domain::slug::{RecordId, SlugInfo, Sluggable};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub slug: SlugInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn set_content(&mut self, title: ArticleTitle, body: ArticleBody, now: DateTime<Utc>) {
        self.title = title;
        self.body = body;
        self.updated_at = now;
    }
}

impl Sluggable for Article {
    const COLLECTION: &'static str = "articles";

    fn record_id(&self) -> RecordId {
        self.id.into()
    }

    fn slug_source_text(&self) -> String {
        self.title.as_str().to_string()
    }

    fn slug_info(&self) -> &SlugInfo {
        &self.slug
    }

    fn slug_info_mut(&mut self) -> &mut SlugInfo {
        &mut self.slug
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub body: ArticleBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub body: Option<ArticleBody>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            body: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}
