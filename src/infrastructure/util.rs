use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, slugify, slugifier::DEFAULT_MAX_LENGTH};

#[derive(Clone)]
pub struct DefaultSlugGenerator {
    max_length: usize,
}

impl DefaultSlugGenerator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Default for DefaultSlugGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> DomainResult<Slug> {
        slugify(input, self.max_length)
    }
}
