use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::repository::SlugClaimRepository;
use crate::domain::slug::value_objects::{CollectionName, RecordId, Slug};

/// Finds a collision-free variant of a candidate slug within a collection.
pub struct UniquenessResolver {
    repo: Arc<dyn SlugClaimRepository>,
    max_suffix: u64,
}

impl UniquenessResolver {
    pub fn new(repo: Arc<dyn SlugClaimRepository>, max_suffix: u64) -> Self {
        Self {
            repo,
            max_suffix: max_suffix.max(2),
        }
    }

    /// Returns `candidate` when nobody else claims it, otherwise the first free of
    /// `candidate-2`, `candidate-3`, ... Claims held by `exclude` (current or former) are free
    /// for that record.
    pub async fn resolve_unique(
        &self,
        collection: &CollectionName,
        candidate: &Slug,
        exclude: Option<RecordId>,
    ) -> DomainResult<Slug> {
        if self.is_available(collection, candidate, exclude).await? {
            return Ok(candidate.clone());
        }

        for counter in 2..=self.max_suffix {
            let variant = candidate.with_suffix(counter);
            if self.is_available(collection, &variant, exclude).await? {
                tracing::debug!(
                    collection = %collection,
                    base = %candidate,
                    slug = %variant,
                    "disambiguated slug"
                );
                return Ok(variant);
            }
        }

        Err(DomainError::UniquenessExhausted {
            base: candidate.to_string(),
            attempts: self.max_suffix,
        })
    }

    async fn is_available(
        &self,
        collection: &CollectionName,
        slug: &Slug,
        exclude: Option<RecordId>,
    ) -> DomainResult<bool> {
        match self.repo.find_by_slug(collection, slug).await? {
            Some(claim) => Ok(exclude == Some(claim.record_id)),
            None => Ok(true),
        }
    }
}
