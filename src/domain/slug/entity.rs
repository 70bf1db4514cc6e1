// src/domain/slug/entity.rs
use crate::domain::slug::value_objects::{CollectionName, RecordId, Slug};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimState {
    Current,
    Historical,
}

/// One slug held by one record. A slug is claimed at most once per collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugClaim {
    pub collection: CollectionName,
    pub slug: Slug,
    pub record_id: RecordId,
    pub state: ClaimState,
    /// Text the slug was derived from. Only kept while the claim is current.
    pub source_text: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

impl SlugClaim {
    pub fn is_current(&self) -> bool {
        self.state == ClaimState::Current
    }

    pub fn is_historical(&self) -> bool {
        self.state == ClaimState::Historical
    }
}

#[derive(Debug, Clone)]
pub struct NewSlugClaim {
    pub collection: CollectionName,
    pub slug: Slug,
    pub record_id: RecordId,
    pub source_text: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

/// Slug state carried by a record: the current slug plus every slug it held before,
/// oldest first. `history` never contains `current`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugInfo {
    pub current: Option<Slug>,
    pub history: Vec<Slug>,
    pub source_text: Option<String>,
}

impl SlugInfo {
    pub fn from_claims(current: Option<SlugClaim>, history: Vec<SlugClaim>) -> Self {
        let source_text = current.as_ref().and_then(|c| c.source_text.clone());
        let current = current.map(|c| c.slug);
        let history = history
            .into_iter()
            .map(|c| c.slug)
            .filter(|slug| Some(slug) != current.as_ref())
            .collect();
        Self {
            current,
            history,
            source_text,
        }
    }

    /// Whether `slug` is this record's current or a former slug.
    pub fn holds(&self, slug: &Slug) -> bool {
        self.current.as_ref() == Some(slug) || self.history.contains(slug)
    }
}

/// Capability of a record type that carries a slug.
///
/// The record keeps a [`SlugInfo`] and calls the lifecycle manager from its own save path.
pub trait Sluggable {
    const COLLECTION: &'static str;

    fn record_id(&self) -> RecordId;

    /// Text the slug is derived from, recomputed on every save.
    fn slug_source_text(&self) -> String;

    fn slug_info(&self) -> &SlugInfo;

    fn slug_info_mut(&mut self) -> &mut SlugInfo;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugChange {
    Assigned(Slug),
    Renamed { from: Slug, to: Slug },
    Unchanged(Slug),
}

impl SlugChange {
    pub fn slug(&self) -> &Slug {
        match self {
            Self::Assigned(slug) | Self::Unchanged(slug) => slug,
            Self::Renamed { to, .. } => to,
        }
    }
}
