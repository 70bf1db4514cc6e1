use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::entity::SlugClaim;
use crate::domain::slug::services::history::SlugHistoryStore;
use crate::domain::slug::value_objects::{CollectionName, RecordId, Slug, SlugKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The requested slug is a record's current slug, exact case.
    Found(SlugClaim),
    /// The request names a record by another spelling or a former slug.
    Redirect { record_id: RecordId, canonical: Slug },
    NotFound,
}

/// Maps a requested slug to a record, a redirect to the canonical slug, or nothing.
///
/// Order: exact current match, then case-insensitive current match, then historical match
/// (exact before case-insensitive). Several candidates at the same step is ambiguous and
/// resolves to `NotFound`.
pub struct SlugResolver {
    history: Arc<SlugHistoryStore>,
}

impl SlugResolver {
    pub fn new(history: Arc<SlugHistoryStore>) -> Self {
        Self { history }
    }

    pub async fn resolve(
        &self,
        collection: &CollectionName,
        requested: &str,
    ) -> DomainResult<Resolution> {
        let resolution = match self.lookup(collection, requested).await {
            Ok(resolution) => resolution,
            Err(DomainError::AmbiguousCaseMatch { requested, matches }) => {
                tracing::warn!(
                    collection = %collection,
                    requested = %requested,
                    matches,
                    "ambiguous case-insensitive slug match"
                );
                Resolution::NotFound
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(collection = %collection, requested, ?resolution, "resolved slug");
        Ok(resolution)
    }

    async fn lookup(&self, collection: &CollectionName, requested: &str) -> DomainResult<Resolution> {
        if Slug::new(requested).is_err() {
            return Ok(Resolution::NotFound);
        }

        let key = SlugKey::from_requested(requested);
        let claims = self.history.claims_matching(collection, &key).await?;
        let (current, historical): (Vec<_>, Vec<_>) =
            claims.into_iter().partition(SlugClaim::is_current);

        if let Some(exact) = current.iter().find(|c| c.slug.as_str() == requested) {
            return Ok(Resolution::Found(exact.clone()));
        }

        match current.as_slice() {
            [] => {}
            [only] => {
                return Ok(Resolution::Redirect {
                    record_id: only.record_id,
                    canonical: only.slug.clone(),
                });
            }
            many => {
                return Err(DomainError::AmbiguousCaseMatch {
                    requested: requested.to_string(),
                    matches: many.len(),
                });
            }
        }

        let owner = match historical.iter().find(|c| c.slug.as_str() == requested) {
            Some(exact) => exact.record_id,
            None => {
                let owners: BTreeSet<RecordId> = historical.iter().map(|c| c.record_id).collect();
                let mut iter = owners.iter();
                match (iter.next(), iter.next()) {
                    (None, _) => return Ok(Resolution::NotFound),
                    (Some(owner), None) => *owner,
                    (Some(_), Some(_)) => {
                        return Err(DomainError::AmbiguousCaseMatch {
                            requested: requested.to_string(),
                            matches: owners.len(),
                        });
                    }
                }
            }
        };

        match self.history.current_claim(collection, owner).await? {
            Some(claim) => Ok(Resolution::Redirect {
                record_id: owner,
                canonical: claim.slug,
            }),
            None => Ok(Resolution::NotFound),
        }
    }
}
