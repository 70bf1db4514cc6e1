// src/application/ports/util.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::Slug;

pub trait SlugGenerator: Send + Sync {
    /// Derive a slug from source text. Text with nothing usable in it yields
    /// `DomainError::InvalidSourceText`.
    fn slugify(&self, input: &str) -> DomainResult<Slug>;
}
