//! # Reelhouse Core
//!
//! Playback coordination for a scroll-driven video showcase: a rotating
//! carousel with auto-advance, lazily loaded media elements and a single
//! global popup player that suspends every background carousel while open.
//!
//! ## Architecture
//!
//! - [`viewport`]: one-shot proximity observer that gates network loading
//! - [`media`]: lazy media wrapper over a host [`media::MediaElement`]
//! - [`carousel`]: pure carousel state and transforms plus the timer-driven
//!   [`carousel::CarouselEngine`] task
//! - [`popup`]: the process-wide popup selection and the popup's own player
//! - [`gallery`]: grid of lazily loaded cards that pause behind the popup
//! - [`showcase`]: the page orchestrator, the single writer of popup state
//!
//! ## Examples
//!
//! ```no_run
//! use reelhouse_core::{
//!     carousel::{CarouselConfig, CarouselKey, Direction},
//!     showcase::Showcase,
//! };
//! use reelhouse_model::{MediaCatalog, MediaItem};
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = MediaCatalog::new(vec![
//!         MediaItem::vertical(1u32, "/vertical-vids/1.mp4")?,
//!         MediaItem::vertical(2u32, "/vertical-vids/2.mp4")?,
//!     ])?;
//!
//!     let mut showcase = Showcase::new();
//!     let config = CarouselConfig::default();
//!     showcase.mount_carousel(CarouselKey::Work, catalog, config)?;
//!     showcase
//!         .request_advance(&CarouselKey::Work, Direction::Forward)
//!         .await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod carousel;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod media;
pub mod popup;
pub mod showcase;
pub mod viewport;

pub use error::{Result, ShowcaseError};
pub use reelhouse_model as model;
