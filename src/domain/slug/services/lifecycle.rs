use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::entity::{SlugChange, Sluggable};
use crate::domain::slug::services::{history::SlugHistoryStore, uniqueness::UniquenessResolver};
use crate::domain::slug::value_objects::{CollectionName, RecordId, Slug};

/// Keeps a record's slug in step with its source text.
///
/// Called from the record's own save path. On every call the stored source text is compared
/// with the record's current one; only a change triggers generation, disambiguation and the
/// history update. The store's unique constraint is the final arbiter: when a concurrent save
/// wins the candidate, the candidate is re-resolved and the write retried.
pub struct SlugLifecycleManager {
    generator: Arc<dyn SlugGenerator>,
    uniqueness: Arc<UniquenessResolver>,
    history: Arc<SlugHistoryStore>,
    max_save_attempts: u32,
}

impl SlugLifecycleManager {
    pub fn new(
        generator: Arc<dyn SlugGenerator>,
        uniqueness: Arc<UniquenessResolver>,
        history: Arc<SlugHistoryStore>,
        max_save_attempts: u32,
    ) -> Self {
        Self {
            generator,
            uniqueness,
            history,
            max_save_attempts: max_save_attempts.max(1),
        }
    }

    /// Refresh the slug of `record` and reload its [`SlugInfo`](crate::domain::slug::SlugInfo)
    /// from storage.
    pub async fn on_save<R>(&self, record: &mut R) -> DomainResult<SlugChange>
    where
        R: Sluggable + Send,
    {
        let collection = CollectionName::new(R::COLLECTION)?;
        let record_id = record.record_id();
        let source_text = record.slug_source_text();

        let change = self.assign(&collection, record_id, &source_text).await?;
        *record.slug_info_mut() = self.history.slug_info(&collection, record_id).await?;
        Ok(change)
    }

    pub async fn assign(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        source_text: &str,
    ) -> DomainResult<SlugChange> {
        let previous = self.history.current_claim(collection, record_id).await?;
        if let Some(claim) = &previous {
            if claim.source_text.as_deref() == Some(source_text) {
                return Ok(SlugChange::Unchanged(claim.slug.clone()));
            }
        }
        let previous = previous.map(|claim| claim.slug);

        let base = self.base_slug(collection, record_id, source_text)?;

        for attempt in 1..=self.max_save_attempts {
            let candidate = self
                .uniqueness
                .resolve_unique(collection, &base, Some(record_id))
                .await?;

            match self
                .history
                .record_current(collection, record_id, &candidate, source_text)
                .await
            {
                Ok(claim) => {
                    let change = match previous {
                        None => SlugChange::Assigned(claim.slug),
                        Some(from) if from == claim.slug => SlugChange::Unchanged(claim.slug),
                        Some(from) => SlugChange::Renamed {
                            from,
                            to: claim.slug,
                        },
                    };
                    if !matches!(change, SlugChange::Unchanged(_)) {
                        tracing::info!(
                            collection = %collection,
                            record = %record_id,
                            slug = %change.slug(),
                            "slug assigned"
                        );
                    }
                    return Ok(change);
                }
                Err(err) if err.is_uniqueness_violation() => {
                    tracing::warn!(
                        collection = %collection,
                        record = %record_id,
                        slug = %candidate,
                        attempt,
                        "slug taken by a concurrent save, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(DomainError::UniquenessExhausted {
            base: base.into_inner(),
            attempts: u64::from(self.max_save_attempts),
        })
    }

    fn base_slug(
        &self,
        collection: &CollectionName,
        record_id: RecordId,
        source_text: &str,
    ) -> DomainResult<Slug> {
        match self.generator.slugify(source_text) {
            Ok(slug) => Ok(slug),
            Err(DomainError::InvalidSourceText(_)) => {
                let fallback = Slug::new(format!("{collection}-{record_id}"))?;
                tracing::warn!(
                    collection = %collection,
                    record = %record_id,
                    slug = %fallback,
                    "source text has no usable characters, falling back to record id"
                );
                Ok(fallback)
            }
            Err(err) => Err(err),
        }
    }
}
