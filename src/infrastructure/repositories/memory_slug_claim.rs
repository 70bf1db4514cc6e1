use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    ClaimState, CollectionName, NewSlugClaim, RecordId, Slug, SlugClaim, SlugClaimRepository,
    SlugKey,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
struct StoredClaim {
    claim: SlugClaim,
    archived_seq: Option<u64>,
}

/// Claim store kept in process memory. Each operation runs under one lock, which gives it the
/// same atomicity as the SQL store's transactions.
#[derive(Default)]
pub struct InMemorySlugClaimRepository {
    claims: Mutex<Vec<StoredClaim>>,
}

impl InMemorySlugClaimRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Vec<StoredClaim>>> {
        self.claims
            .lock()
            .map_err(|_| DomainError::Persistence("slug claim store lock poisoned".into()))
    }
}

fn next_archive_seq(claims: &[StoredClaim], collection: &CollectionName, record_id: RecordId) -> u64 {
    claims
        .iter()
        .filter(|s| &s.claim.collection == collection && s.claim.record_id == record_id)
        .filter_map(|s| s.archived_seq)
        .max()
        .unwrap_or(0)
        + 1
}

fn archive(stored: &mut StoredClaim, seq: u64) {
    stored.claim.state = ClaimState::Historical;
    stored.claim.source_text = None;
    stored.archived_seq = Some(seq);
}

#[async_trait]
impl SlugClaimRepository for InMemorySlugClaimRepository {
    async fn find_by_slug(
        &self,
        collection: &CollectionName,
        slug: &Slug,
    ) -> DomainResult<Option<SlugClaim>> {
        let claims = self.lock()?;
        Ok(claims
            .iter()
            .find(|s| &s.claim.collection == collection && &s.claim.slug == slug)
            .map(|s| s.claim.clone()))
    }

    async fn find_by_key(
        &self,
        collection: &CollectionName,
        key: &SlugKey,
    ) -> DomainResult<Vec<SlugClaim>> {
        let claims = self.lock()?;
        let mut matches: Vec<SlugClaim> = claims
            .iter()
            .filter(|s| &s.claim.collection == collection && s.claim.slug.key() == *key)
            .map(|s| s.claim.clone())
            .collect();
        matches.sort_by_key(|c| !c.is_current());
        Ok(matches)
    }

    async fn find_current(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Option<SlugClaim>> {
        let claims = self.lock()?;
        Ok(claims
            .iter()
            .find(|s| {
                &s.claim.collection == collection
                    && s.claim.record_id == record_id
                    && s.claim.is_current()
            })
            .map(|s| s.claim.clone()))
    }

    async fn list_history(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Vec<SlugClaim>> {
        let claims = self.lock()?;
        let mut history: Vec<&StoredClaim> = claims
            .iter()
            .filter(|s| {
                &s.claim.collection == collection
                    && s.claim.record_id == record_id
                    && s.claim.is_historical()
            })
            .collect();
        history.sort_by_key(|s| s.archived_seq);
        Ok(history.into_iter().map(|s| s.claim.clone()).collect())
    }

    async fn assign_current(&self, claim: NewSlugClaim) -> DomainResult<SlugClaim> {
        let mut claims = self.lock()?;

        let existing = claims
            .iter()
            .position(|s| s.claim.collection == claim.collection && s.claim.slug == claim.slug);
        if let Some(index) = existing {
            if claims[index].claim.record_id != claim.record_id {
                return Err(DomainError::UniquenessViolation(format!(
                    "{} already claimed in {}",
                    claim.slug, claim.collection
                )));
            }
        }

        let seq = next_archive_seq(&claims, &claim.collection, claim.record_id);
        for stored in claims.iter_mut() {
            if stored.claim.collection == claim.collection
                && stored.claim.record_id == claim.record_id
                && stored.claim.is_current()
                && stored.claim.slug != claim.slug
            {
                archive(stored, seq);
            }
        }

        let assigned = SlugClaim {
            collection: claim.collection,
            slug: claim.slug,
            record_id: claim.record_id,
            state: ClaimState::Current,
            source_text: claim.source_text,
            assigned_at: claim.assigned_at,
        };
        let stored = StoredClaim {
            claim: assigned.clone(),
            archived_seq: None,
        };
        match existing {
            Some(index) => claims[index] = stored,
            None => claims.push(stored),
        }
        Ok(assigned)
    }

    async fn insert_historical(&self, claim: NewSlugClaim) -> DomainResult<SlugClaim> {
        let mut claims = self.lock()?;
        if claims
            .iter()
            .any(|s| s.claim.collection == claim.collection && s.claim.slug == claim.slug)
        {
            return Err(DomainError::UniquenessViolation(format!(
                "{} already claimed in {}",
                claim.slug, claim.collection
            )));
        }

        let seq = next_archive_seq(&claims, &claim.collection, claim.record_id);
        let historical = SlugClaim {
            collection: claim.collection,
            slug: claim.slug,
            record_id: claim.record_id,
            state: ClaimState::Historical,
            source_text: None,
            assigned_at: claim.assigned_at,
        };
        claims.push(StoredClaim {
            claim: historical.clone(),
            archived_seq: Some(seq),
        });
        Ok(historical)
    }

    async fn retire(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        slug: &Slug,
    ) -> DomainResult<()> {
        let mut claims = self.lock()?;
        let seq = next_archive_seq(&claims, collection, record_id);
        if let Some(stored) = claims.iter_mut().find(|s| {
            &s.claim.collection == collection
                && s.claim.record_id == record_id
                && &s.claim.slug == slug
                && s.claim.is_current()
        }) {
            archive(stored, seq);
        }
        Ok(())
    }

    async fn release_record(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<u64> {
        let mut claims = self.lock()?;
        let before = claims.len();
        claims.retain(|s| !(&s.claim.collection == collection && s.claim.record_id == record_id));
        Ok((before - claims.len()) as u64)
    }
}
