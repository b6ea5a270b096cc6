use std::fmt::{self, Display};

use crate::ids::MediaItemId;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    EmptyCatalog,
    DuplicateItem(MediaItemId),
    InvalidMedia(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyCatalog => {
                write!(f, "catalog must contain at least one item")
            }
            ModelError::DuplicateItem(id) => {
                write!(f, "duplicate media item id {id}")
            }
            ModelError::InvalidMedia(msg) => write!(f, "invalid media: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
