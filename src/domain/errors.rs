// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The store rejected a write because the slug is already claimed.
    #[error("slug already claimed: {0}")]
    UniquenessViolation(String),

    #[error("source text cannot produce a slug: {0:?}")]
    InvalidSourceText(String),

    #[error("no free slug variant for {base} after {attempts} attempts")]
    UniquenessExhausted { base: String, attempts: u64 },

    #[error("slug {slug} in {collection} is claimed by record {owner}, not record {requested_by}")]
    HistoryInvariantViolation {
        collection: String,
        slug: String,
        owner: i64,
        requested_by: i64,
    },

    #[error("slug {requested} matches {matches} records case-insensitively")]
    AmbiguousCaseMatch { requested: String, matches: usize },
}

impl DomainError {
    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, Self::UniquenessViolation(_))
    }
}
