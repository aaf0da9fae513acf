//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod category;
pub mod detail;
pub mod listing;
pub mod presentation;

// Intentionally curated re-exports for downstream consumers.
pub use category::{Category, CategoryMeta, CategorySpec, ListingKind};
pub use detail::DetailResult;
pub use listing::{CategorizedItem, ListingItem};
pub use presentation::PresentationItem;
