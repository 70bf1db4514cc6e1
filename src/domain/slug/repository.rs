use crate::domain::errors::DomainResult;
use crate::domain::slug::entity::{NewSlugClaim, SlugClaim};
use crate::domain::slug::value_objects::{CollectionName, RecordId, Slug, SlugKey};
use async_trait::async_trait;

/// Storage for slug claims. Implementations must enforce that a slug is claimed at most once
/// per collection and that a record has at most one current claim, reporting violations as
/// `DomainError::UniquenessViolation`.
#[async_trait]
pub trait SlugClaimRepository: Send + Sync {
    async fn find_by_slug(
        &self,
        collection: &CollectionName,
        slug: &Slug,
    ) -> DomainResult<Option<SlugClaim>>;

    /// Every claim, current or historical, whose slug folds to `key`.
    async fn find_by_key(
        &self,
        collection: &CollectionName,
        key: &SlugKey,
    ) -> DomainResult<Vec<SlugClaim>>;

    async fn find_current(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Option<SlugClaim>>;

    /// Historical claims of a record, oldest archive first.
    async fn list_history(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<Vec<SlugClaim>>;

    /// Make `claim.slug` the record's current slug in one atomic step. Any other current claim
    /// of the record is archived; a historical claim of the same record is reactivated.
    async fn assign_current(&self, claim: NewSlugClaim) -> DomainResult<SlugClaim>;

    async fn insert_historical(&self, claim: NewSlugClaim) -> DomainResult<SlugClaim>;

    /// Archive the record's current claim on `slug`. No-op when it is already historical.
    async fn retire(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        slug: &Slug,
    ) -> DomainResult<()>;

    /// Drop every claim of a deleted record.
    async fn release_record(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
    ) -> DomainResult<u64>;
}
