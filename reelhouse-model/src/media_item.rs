use crate::error::{ModelError, Result};
use crate::ids::MediaItemId;
use crate::media_kind::MediaKind;

/// A single showcase video as defined by content configuration.
///
/// Items are immutable once built. Every gallery or carousel owns its own
/// copy; nothing mutates an item at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    id: MediaItemId,
    #[cfg_attr(feature = "serde", serde(default))]
    kind: MediaKind,
    source_url: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    title: Option<String>,
}

impl MediaItem {
    pub fn new(
        id: impl Into<MediaItemId>,
        kind: MediaKind,
        source_url: impl Into<String>,
    ) -> Result<Self> {
        let source_url = source_url.into();
        if source_url.trim().is_empty() {
            return Err(ModelError::InvalidMedia(
                "source url cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            kind,
            source_url,
            title: None,
        })
    }

    pub fn vertical(
        id: impl Into<MediaItemId>,
        source_url: impl Into<String>,
    ) -> Result<Self> {
        Self::new(id, MediaKind::Vertical, source_url)
    }

    pub fn horizontal(
        id: impl Into<MediaItemId>,
        source_url: impl Into<String>,
    ) -> Result<Self> {
        Self::new(id, MediaKind::Horizontal, source_url)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> MediaItemId {
        self.id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Re-check invariants on values that bypassed [`MediaItem::new`], such
    /// as items deserialized from configuration.
    pub fn validate(&self) -> Result<()> {
        if self.source_url.trim().is_empty() {
            return Err(ModelError::InvalidMedia(format!(
                "item {} has an empty source url",
                self.id
            )));
        }
        Ok(())
    }
}
