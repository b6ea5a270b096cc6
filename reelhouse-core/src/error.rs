//! Error types for the showcase engine.

use reelhouse_model::ModelError;
use thiserror::Error;

use crate::carousel::CarouselKey;
use crate::gallery::GalleryKey;

/// Failures surfaced by the engine. Redundant user actions (advancing while a
/// transition settles, selecting an off-center item) are reported through
/// outcome enums instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShowcaseError {
    #[error("Invalid media catalog: {0}")]
    Model(#[from] ModelError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Carousel not mounted: {0}")]
    UnknownCarousel(CarouselKey),

    #[error("Gallery not mounted: {0}")]
    UnknownGallery(GalleryKey),

    #[error("Carousel engine stopped: {0}")]
    EngineStopped(CarouselKey),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
