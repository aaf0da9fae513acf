//! Shared configuration library for Marquee.
//!
//! Centralizes the carousel configuration model, its defaults and
//! validation rules, and the loader that resolves overrides from the
//! environment or well-known files. The `marquee-preview` binary builds on
//! these utilities.

pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigSource, error::ConfigLoadError};
pub use models::CarouselConfig;
