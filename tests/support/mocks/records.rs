// tests/support/mocks/records.rs
use permaslug::domain::slug::{RecordId, SlugInfo, Sluggable};

/// Minimal record type living in its own collection.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: RecordId,
    pub name: String,
    pub slug: SlugInfo,
}

impl Person {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: RecordId::new(id).expect("positive id"),
            name: name.to_string(),
            slug: SlugInfo::default(),
        }
    }

    pub fn current_slug(&self) -> Option<&str> {
        self.slug.current.as_ref().map(|s| s.as_str())
    }

    pub fn history(&self) -> Vec<&str> {
        self.slug.history.iter().map(|s| s.as_str()).collect()
    }
}

impl Sluggable for Person {
    const COLLECTION: &'static str = "people";

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn slug_source_text(&self) -> String {
        self.name.clone()
    }

    fn slug_info(&self) -> &SlugInfo {
        &self.slug
    }

    fn slug_info_mut(&mut self) -> &mut SlugInfo {
        &mut self.slug
    }
}
