//! Configuration layer for the Reelhouse showcase.
//!
//! [`ShowcaseConfig`] describes every carousel and gallery on a page along
//! with the shared timing and lazy-loading settings. It is loaded from a
//! TOML or JSON file, inline JSON in the environment, or built-in defaults
//! that reproduce the original work page. [`telemetry`] installs the tracing
//! subscriber used by the `reelhouse-sim` binary.

pub mod showcase;
pub mod telemetry;

pub use showcase::{
    CONFIG_JSON_ENV, CONFIG_PATH_ENV, CarouselEntry, CarouselSettings,
    ConfigFormat, GalleryEntry, LazyLoadSettings, ShowcaseConfig,
    ShowcaseConfigSource,
};
