pub mod entity;
pub mod repository;
pub mod services;
pub mod slugifier;
pub mod value_objects;

pub use entity::{ClaimState, NewSlugClaim, SlugChange, SlugClaim, SlugInfo, Sluggable};
pub use repository::SlugClaimRepository;
pub use slugifier::slugify;
pub use value_objects::{CollectionName, RecordId, Slug, SlugKey};
