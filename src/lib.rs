//! Permanent, human-readable slugs for stored records.
//!
//! Slugs are generated from a record's text, kept unique per collection, and never released
//! while the record lives: a renamed record keeps answering to every slug it ever held, and
//! requests in the wrong letter case are redirected to the canonical spelling.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
