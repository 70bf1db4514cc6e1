use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::entity::{NewSlugClaim, SlugClaim, SlugInfo};
use crate::domain::slug::repository::SlugClaimRepository;
use crate::domain::slug::value_objects::{CollectionName, RecordId, Slug, SlugKey};

/// Per-record log of every slug ever assigned, with the current one marked.
pub struct SlugHistoryStore {
    repo: Arc<dyn SlugClaimRepository>,
    clock: Arc<dyn Clock>,
}

impl SlugHistoryStore {
    pub fn new(repo: Arc<dyn SlugClaimRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Make `slug` the record's current slug. The previous current slug, if different,
    /// moves into history.
    pub async fn record_current(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        slug: &Slug,
        source_text: &str,
    ) -> DomainResult<SlugClaim> {
        self.repo
            .assign_current(NewSlugClaim {
                collection: collection.clone(),
                slug: slug.clone(),
                record_id,
                source_text: Some(source_text.to_string()),
                assigned_at: self.clock.now(),
            })
            .await
    }

    /// Put `old_slug` into the record's history. Archiving a slug that is already in the
    /// record's history is a no-op; a slug claimed by another record is an invariant failure.
    pub async fn archive(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        old_slug: &Slug,
    ) -> DomainResult<()> {
        match self.repo.find_by_slug(collection, old_slug).await? {
            Some(claim) if claim.record_id != record_id => {
                tracing::error!(
                    collection = %collection,
                    slug = %old_slug,
                    owner = %claim.record_id,
                    requested_by = %record_id,
                    "refusing to archive a slug owned by another record"
                );
                Err(DomainError::HistoryInvariantViolation {
                    collection: collection.to_string(),
                    slug: old_slug.to_string(),
                    owner: claim.record_id.into(),
                    requested_by: record_id.into(),
                })
            }
            Some(claim) if claim.is_historical() => Ok(()),
            Some(_) => self.repo.retire(collection, record_id, old_slug).await,
            None => {
                self.repo
                    .insert_historical(NewSlugClaim {
                        collection: collection.clone(),
                        slug: old_slug.clone(),
                        record_id,
                        source_text: None,
                        assigned_at: self.clock.now(),
                    })
                    .await?;
                Ok(())
            }
        }
    }

    /// True when `slug` is any record's current or historical slug.
    pub async fn is_claimed(&self, collection: &CollectionName, slug: &Slug) -> DomainResult<bool> {
        Ok(self.repo.find_by_slug(collection, slug).await?.is_some())
    }

    pub async fn lookup_current_owner(
        &self,
        collection: &CollectionName,
        slug: &Slug,
    ) -> DomainResult<Option<RecordId>> {
        Ok(self
            .repo
            .find_by_slug(collection, slug)
            .await?
            .filter(SlugClaim::is_current)
            .map(|claim| claim.record_id))
    }

    pub async fn lookup_historical_owner(
        &self,
        collection: &CollectionName,
        slug: &Slug,
    ) -> DomainResult<Option<RecordId>> {
        Ok(self
            .repo
            .find_by_slug(collection, slug)
            .await?
            .filter(SlugClaim::is_historical)
            .map(|claim| claim.record_id))
    }

    pub async fn current_claim(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Option<SlugClaim>> {
        self.repo.find_current(collection, record_id).await
    }

    pub async fn claims_matching(
        &self,
        collection: &CollectionName,
        key: &SlugKey,
    ) -> DomainResult<Vec<SlugClaim>> {
        self.repo.find_by_key(collection, key).await
    }

    pub async fn slug_info(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<SlugInfo> {
        let current = self.repo.find_current(collection, record_id).await?;
        let history = self.repo.list_history(collection, record_id).await?;
        Ok(SlugInfo::from_claims(current, history))
    }

    pub async fn release_record(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<()> {
        let released = self.repo.release_record(collection, record_id).await?;
        tracing::debug!(collection = %collection, record = %record_id, released, "released slug claims");
        Ok(())
    }
}
