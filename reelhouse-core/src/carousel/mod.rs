//! Rotating media carousel.
//!
//! The carousel is split into a pure core and a timer-driven shell:
//!
//! - [`state`]: index arithmetic and the transition lock, no clocks involved
//! - [`transform`]: per-item presentation descriptors as a pure function of
//!   `(index, active_index, len)`
//! - [`engine`]: a tokio task that owns the settle and auto-advance deadlines
//!   and follows the global popup selection
//! - [`view`]: binds lazily loaded media to an engine's snapshots

pub mod engine;
pub mod state;
pub mod transform;
pub mod types;
pub mod view;

pub use engine::{CarouselEngine, CarouselSnapshot};
pub use state::{AdvanceOutcome, CarouselState};
pub use transform::{
    ItemTransform, TransformStyle, circular_offset, item_transform,
};
pub use types::{CarouselConfig, CarouselKey, Direction};
pub use view::CarouselView;
