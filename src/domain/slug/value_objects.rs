use crate::domain::errors::{DomainError, DomainResult};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a record inside its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) i64);

impl RecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("record id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of the set of records within which slugs are unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("collection name cannot be empty".into()));
        }
        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid {
            return Err(DomainError::Validation(format!(
                "collection name {value:?} must be lowercase ascii"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored slug. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if !value.chars().all(is_slug_char) {
            return Err(DomainError::Validation(format!(
                "slug {value:?} contains characters that are not url-safe"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `base-n`, used to disambiguate colliding candidates.
    pub fn with_suffix(&self, counter: u64) -> Self {
        Self(format!("{}-{}", self.0, counter))
    }

    pub fn key(&self) -> SlugKey {
        SlugKey::from_requested(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub(crate) fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Case-folded form of a slug, used for case-insensitive lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugKey(String);

impl SlugKey {
    pub fn from_requested(value: &str) -> Self {
        Self(value.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex SHA-256 of the folded slug; this is what the claim index stores.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(self.0.as_bytes());
        format!("{hash:x}")
    }
}
