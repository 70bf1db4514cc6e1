use super::{map_sqlx, sqlite_slug_claim::SqliteSlugClaimRepository};
use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleReadRepository, ArticleTitle, ArticleUpdate,
    ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{CollectionName, SlugClaimRepository, SlugInfo, Sluggable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteArticleWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteArticleWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqliteArticleReadRepository {
    pool: Arc<SqlitePool>,
    claims: SqliteSlugClaimRepository,
}

impl SqliteArticleReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let claims = SqliteSlugClaimRepository::new(Arc::clone(&pool));
        Self { pool, claims }
    }

    async fn with_slug(&self, mut article: Article) -> DomainResult<Article> {
        let collection = CollectionName::new(Article::COLLECTION)?;
        let record_id = article.record_id();
        let current = self.claims.find_current(&collection, record_id).await?;
        let history = self.claims.list_history(&collection, record_id).await?;
        article.slug = SlugInfo::from_claims(current, history);
        Ok(article)
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            body: ArticleBody::new(row.body)?,
            slug: SlugInfo::default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for SqliteArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            body,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(
            "INSERT INTO articles (title, body, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id, title, body, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(body.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            body,
            original_updated_at,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, ArticleRow>(
            "UPDATE articles SET title = COALESCE(?, title), body = COALESCE(?, body), updated_at = ? WHERE id = ? AND updated_at = ? RETURNING id, title, body, created_at, updated_at",
        )
        .bind(title.as_ref().map(|t| t.as_str()))
        .bind(body.as_ref().map(|b| b.as_str()))
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(original_updated_at)
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        let row = row
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query("DELETE FROM slug_claims WHERE collection = ? AND record_id = ?")
            .bind(Article::COLLECTION)
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for SqliteArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, body, created_at, updated_at FROM articles WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(Some(self.with_slug(Article::try_from(row)?).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, body, created_at, updated_at FROM articles ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            articles.push(self.with_slug(Article::try_from(row)?).await?);
        }
        Ok(articles)
    }
}
