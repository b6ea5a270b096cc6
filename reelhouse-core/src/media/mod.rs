//! Lazily loaded media and the host media-element port.

pub mod element;
pub mod headless;
pub mod lazy;

pub use element::{MediaElement, PlaybackRejected};
pub use headless::{AutoplayPolicy, HeadlessElement};
pub use lazy::{LazyMedia, LoadState, PlaybackIntent, PlaybackState};
