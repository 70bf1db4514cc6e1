// src/presentation/http/middleware/mod.rs
pub mod resolve_slug;

pub use resolve_slug::{ResolvedSlug, resolve_slug};
