// tests/support/mocks/util.rs
use chrono::{DateTime, Duration, Utc};
use permaslug::application::ports::{time::Clock, util::SlugGenerator};
use permaslug::domain::errors::{DomainError, DomainResult};
use permaslug::domain::slug::Slug;
use permaslug::infrastructure::util::DefaultSlugGenerator;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Clone)]
pub struct DummyClock;

impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        super::time::fixed_now()
    }
}

/// Advances one second per call, so successive writes get distinct timestamps.
#[derive(Default)]
pub struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        super::time::fixed_now() + Duration::seconds(tick)
    }
}

/// Uses the source text verbatim, rejecting anything that is not already a valid slug.
#[derive(Clone)]
pub struct DummySlug;

impl SlugGenerator for DummySlug {
    fn slugify(&self, s: &str) -> DomainResult<Slug> {
        Slug::new(s).map_err(|_| DomainError::InvalidSourceText(s.to_string()))
    }
}

/// Real slugifier, except that one exact source text makes generation fail outright.
pub struct RejectingSlug {
    pub rejected: &'static str,
}

impl SlugGenerator for RejectingSlug {
    fn slugify(&self, s: &str) -> DomainResult<Slug> {
        if s == self.rejected {
            return Err(DomainError::Persistence("slug generator unavailable".into()));
        }
        DefaultSlugGenerator::default().slugify(s)
    }
}
