//! Media catalog models shared across Reelhouse crates.
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod ids;
pub mod media_item;
pub mod media_kind;

pub use catalog::MediaCatalog;
pub use error::{ModelError, Result as ModelResult};
pub use ids::MediaItemId;
pub use media_item::MediaItem;
pub use media_kind::MediaKind;
