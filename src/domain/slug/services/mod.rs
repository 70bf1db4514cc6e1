// src/domain/slug/services/mod.rs
pub mod history;
pub mod lifecycle;
pub mod resolver;
pub mod uniqueness;

pub use history::SlugHistoryStore;
pub use lifecycle::SlugLifecycleManager;
pub use resolver::{Resolution, SlugResolver};
pub use uniqueness::UniquenessResolver;

use crate::domain::slug::slugifier::DEFAULT_MAX_LENGTH;

/// Tunables shared by the slug services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugPolicy {
    pub max_length: usize,
    /// Highest numeric suffix tried before giving up on a base slug.
    pub max_suffix: u64,
    /// Writes retried after losing a race on the store's unique constraint.
    pub max_save_attempts: u32,
}

impl Default for SlugPolicy {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_suffix: 10_000,
            max_save_attempts: 5,
        }
    }
}
