use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    ClaimState, CollectionName, NewSlugClaim, RecordId, Slug, SlugClaim, SlugClaimRepository,
    SlugKey,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteSlugClaimRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteSlugClaimRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SlugClaimRow {
    collection: String,
    slug: String,
    record_id: i64,
    is_current: i64,
    source_text: Option<String>,
    assigned_at: DateTime<Utc>,
}

impl TryFrom<SlugClaimRow> for SlugClaim {
    type Error = DomainError;

    fn try_from(row: SlugClaimRow) -> Result<Self, Self::Error> {
        Ok(SlugClaim {
            collection: CollectionName::new(row.collection)?,
            slug: Slug::new(row.slug)?,
            record_id: RecordId::new(row.record_id)?,
            state: if row.is_current != 0 {
                ClaimState::Current
            } else {
                ClaimState::Historical
            },
            source_text: row.source_text,
            assigned_at: row.assigned_at,
        })
    }
}

const NEXT_ARCHIVE_SEQ: &str = "(SELECT COALESCE(MAX(archived_seq), 0) + 1 FROM slug_claims WHERE collection = ? AND record_id = ?)";

#[async_trait]
impl SlugClaimRepository for SqliteSlugClaimRepository {
    async fn find_by_slug(
        &self,
        collection: &CollectionName,
        slug: &Slug,
    ) -> DomainResult<Option<SlugClaim>> {
        let row = sqlx::query_as::<_, SlugClaimRow>(
            "SELECT collection, slug, record_id, is_current, source_text, assigned_at FROM slug_claims WHERE collection = ? AND slug = ?",
        )
        .bind(collection.as_str())
        .bind(slug.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(SlugClaim::try_from).transpose()
    }

    async fn find_by_key(
        &self,
        collection: &CollectionName,
        key: &SlugKey,
    ) -> DomainResult<Vec<SlugClaim>> {
        let rows = sqlx::query_as::<_, SlugClaimRow>(
            "SELECT collection, slug, record_id, is_current, source_text, assigned_at FROM slug_claims WHERE collection = ? AND slug_lower_hash = ? ORDER BY is_current DESC, id",
        )
        .bind(collection.as_str())
        .bind(key.digest())
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(SlugClaim::try_from)
            // The hash index narrows the scan; the folded comparison is authoritative.
            .filter(|claim| claim.as_ref().map_or(true, |c| c.slug.key() == *key))
            .collect()
    }

    async fn find_current(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Option<SlugClaim>> {
        let row = sqlx::query_as::<_, SlugClaimRow>(
            "SELECT collection, slug, record_id, is_current, source_text, assigned_at FROM slug_claims WHERE collection = ? AND record_id = ? AND is_current = 1",
        )
        .bind(collection.as_str())
        .bind(i64::from(record_id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(SlugClaim::try_from).transpose()
    }

    async fn list_history(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Vec<SlugClaim>> {
        let rows = sqlx::query_as::<_, SlugClaimRow>(
            "SELECT collection, slug, record_id, is_current, source_text, assigned_at FROM slug_claims WHERE collection = ? AND record_id = ? AND is_current = 0 ORDER BY archived_seq, id",
        )
        .bind(collection.as_str())
        .bind(i64::from(record_id))
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(SlugClaim::try_from).collect()
    }

    async fn assign_current(&self, claim: NewSlugClaim) -> DomainResult<SlugClaim> {
        let NewSlugClaim {
            collection,
            slug,
            record_id,
            source_text,
            assigned_at,
        } = claim;
        let record = i64::from(record_id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let retire_sql = format!(
            "UPDATE slug_claims SET is_current = 0, source_text = NULL, archived_seq = {NEXT_ARCHIVE_SEQ} WHERE collection = ? AND record_id = ? AND is_current = 1 AND slug <> ?"
        );
        sqlx::query(&retire_sql)
            .bind(collection.as_str())
            .bind(record)
            .bind(collection.as_str())
            .bind(record)
            .bind(slug.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let reactivated = sqlx::query(
            "UPDATE slug_claims SET is_current = 1, source_text = ?, assigned_at = ?, archived_seq = NULL WHERE collection = ? AND record_id = ? AND slug = ?",
        )
        .bind(source_text.as_deref())
        .bind(assigned_at)
        .bind(collection.as_str())
        .bind(record)
        .bind(slug.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if reactivated.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO slug_claims (collection, slug, slug_lower_hash, record_id, is_current, source_text, assigned_at) VALUES (?, ?, ?, ?, 1, ?, ?)",
            )
            .bind(collection.as_str())
            .bind(slug.as_str())
            .bind(slug.key().digest())
            .bind(record)
            .bind(source_text.as_deref())
            .bind(assigned_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;

        Ok(SlugClaim {
            collection,
            slug,
            record_id,
            state: ClaimState::Current,
            source_text,
            assigned_at,
        })
    }

    async fn insert_historical(&self, claim: NewSlugClaim) -> DomainResult<SlugClaim> {
        let NewSlugClaim {
            collection,
            slug,
            record_id,
            assigned_at,
            ..
        } = claim;
        let record = i64::from(record_id);

        let insert_sql = format!(
            "INSERT INTO slug_claims (collection, slug, slug_lower_hash, record_id, is_current, source_text, assigned_at, archived_seq) VALUES (?, ?, ?, ?, 0, NULL, ?, {NEXT_ARCHIVE_SEQ})"
        );
        sqlx::query(&insert_sql)
            .bind(collection.as_str())
            .bind(slug.as_str())
            .bind(slug.key().digest())
            .bind(record)
            .bind(assigned_at)
            .bind(collection.as_str())
            .bind(record)
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(SlugClaim {
            collection,
            slug,
            record_id,
            state: ClaimState::Historical,
            source_text: None,
            assigned_at,
        })
    }

    async fn retire(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        slug: &Slug,
    ) -> DomainResult<()> {
        let record = i64::from(record_id);
        let retire_sql = format!(
            "UPDATE slug_claims SET is_current = 0, source_text = NULL, archived_seq = {NEXT_ARCHIVE_SEQ} WHERE collection = ? AND record_id = ? AND slug = ? AND is_current = 1"
        );
        sqlx::query(&retire_sql)
            .bind(collection.as_str())
            .bind(record)
            .bind(collection.as_str())
            .bind(record)
            .bind(slug.as_str())
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn release_record(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM slug_claims WHERE collection = ? AND record_id = ?")
            .bind(collection.as_str())
            .bind(i64::from(record_id))
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected())
    }
}
