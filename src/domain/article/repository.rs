use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Optimistic update; fails with `DomainError::Conflict` when the row changed since
    /// `original_updated_at`.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    /// Removes the row together with every slug claim the article holds, in one unit.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

/// Reads return articles with their slug state loaded.
#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn list(&self) -> DomainResult<Vec<Article>>;
}
