//! Trait surfaces describing the collaborators the carousel engine talks
//! to: the remote listing and detail sources, the position controller, and
//! the image-reference normaliser.

pub mod error;
pub mod image;
pub mod position;
pub mod source;

pub use error::SourceError;
pub use image::ImageNormalizer;
pub use position::{IndexHandler, PositionController, SubscriptionId};
pub use source::{DetailSource, ListingSource};

/// Frequently used contract imports for engine and provider crates.
pub mod prelude {
    pub use super::error::SourceError;
    pub use super::image::ImageNormalizer;
    pub use super::position::{
        IndexHandler, PositionController, SubscriptionId,
    };
    pub use super::source::{DetailSource, ListingSource};
}
