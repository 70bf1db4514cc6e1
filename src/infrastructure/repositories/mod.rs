// src/infrastructure/repositories/mod.rs
mod error;
mod memory_slug_claim;
mod sqlite_article;
mod sqlite_slug_claim;

pub use error::map_sqlx;
pub use memory_slug_claim::InMemorySlugClaimRepository;
pub use sqlite_article::{SqliteArticleReadRepository, SqliteArticleWriteRepository};
pub use sqlite_slug_claim::SqliteSlugClaimRepository;
