// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod records;
pub mod repos;
pub mod time;
pub mod util;

pub use records::Person;
pub use repos::FlakyArticleWrites;
pub use time::fixed_now;
pub use util::{DummyClock, DummySlug, RejectingSlug, SteppingClock};
