//! # Marquee Core
//!
//! Data-aggregation and autoplay-synchronization engine behind the home
//! page hero carousel.
//!
//! ## Overview
//!
//! One aggregation cycle runs in two stages:
//!
//! - **Aggregation** ([`aggregate`]): one concurrent listing request per
//!   configured [`CategorySpec`], all-or-nothing, concatenated in spec order
//!   and tagged with the originating category.
//! - **Enrichment** ([`enrich`]): one concurrent detail request per item,
//!   failures degrade the single item to its poster.
//!
//! The [`engine::CarouselEngine`] commits the resulting presentation
//! sequence atomically, discards results of superseded cycles through a
//! generation token, keeps the active index in sync with an external
//! [`PositionController`], and drives it with the [`autoplay`] scheduler.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use marquee_core::engine::{CarouselEngine, EngineConfig};
//! use marquee_core::position::CyclicPosition;
//! use marquee_core::providers::DoubanClient;
//! use marquee_model::CategorySpec;
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(DoubanClient::new("http://localhost:3000")?);
//!     let engine = CarouselEngine::new(
//!         client.clone(),
//!         client,
//!         Arc::new(CyclicPosition::new()),
//!         EngineConfig::default(),
//!     );
//!     engine.mount();
//!     engine.reconfigure(CategorySpec::defaults()).await;
//!     println!("{:?}", engine.snapshot().active_category);
//!     engine.teardown();
//!     Ok(())
//! }
//! ```
//!
//! [`CategorySpec`]: marquee_model::CategorySpec
//! [`PositionController`]: marquee_contracts::PositionController

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Concurrent all-or-nothing listing fan-out
pub mod aggregate;

/// Periodic auto-advance of the position controller
pub mod autoplay;

/// Active-category derivation
pub mod derive;

/// Per-item detail fan-out with local degradation
pub mod enrich;

/// Cycle orchestration, lifecycle, and state ownership
pub mod engine;

/// Error types surfaced by the engine
pub mod error;

/// In-process cyclic position controller
pub mod position;

/// Remote listing/detail sources and image normalisers
pub mod providers;

/// Render-facing projections of the carousel state
pub mod view;

mod request;

pub use aggregate::aggregate;
pub use derive::derive_active_category;
pub use enrich::enrich;
pub use error::AggregationFailure;
