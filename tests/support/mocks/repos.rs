use async_trait::async_trait;
use permaslug::domain::article::{
    Article, ArticleId, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use permaslug::domain::errors::{DomainError, DomainResult};
use std::sync::Arc;

/// Delegates to a real write repository, failing updates or deletes on request.
pub struct FlakyArticleWrites {
    inner: Arc<dyn ArticleWriteRepository>,
    fail_updates: bool,
    fail_deletes: bool,
}

impl FlakyArticleWrites {
    /// Every update loses the optimistic check, as if another save got there first.
    pub fn conflicting_updates(inner: Arc<dyn ArticleWriteRepository>) -> Self {
        Self {
            inner,
            fail_updates: true,
            fail_deletes: false,
        }
    }

    pub fn failing_deletes(inner: Arc<dyn ArticleWriteRepository>) -> Self {
        Self {
            inner,
            fail_updates: false,
            fail_deletes: true,
        }
    }
}

#[async_trait]
impl ArticleWriteRepository for FlakyArticleWrites {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        self.inner.insert(article).await
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        if self.fail_updates {
            return Err(DomainError::Conflict("article update conflict".into()));
        }
        self.inner.update(update).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        if self.fail_deletes {
            return Err(DomainError::Persistence("delete unavailable".into()));
        }
        self.inner.delete(id).await
    }
}
