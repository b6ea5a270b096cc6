use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::ids::MediaItemId;
use crate::media_item::MediaItem;

/// Ordered, non-empty list of media items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCatalog {
    items: Vec<MediaItem>,
}

impl MediaCatalog {
    pub fn new(items: Vec<MediaItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(ModelError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id()) {
                return Err(ModelError::DuplicateItem(item.id()));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn position(&self, id: MediaItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn find(&self, id: MediaItemId) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[MediaItem] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a MediaCatalog {
    type Item = &'a MediaItem;
    type IntoIter = std::slice::Iter<'a, MediaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl TryFrom<Vec<MediaItem>> for MediaCatalog {
    type Error = ModelError;

    fn try_from(items: Vec<MediaItem>) -> Result<Self> {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(id: u32) -> MediaItem {
        MediaItem::vertical(id, format!("/vertical-vids/{id}.mp4")).unwrap()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = MediaCatalog::new(Vec::new()).unwrap_err();
        assert_eq!(err, ModelError::EmptyCatalog);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = MediaCatalog::new(vec![vertical(1), vertical(2), vertical(1)])
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateItem(MediaItemId(1)));
    }

    #[test]
    fn lookups_follow_configured_order() {
        let items = vec![vertical(4), vertical(2), vertical(9)];
        let catalog = MediaCatalog::new(items).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position(MediaItemId(9)), Some(2));
        assert_eq!(catalog.get(1).map(MediaItem::id), Some(MediaItemId(2)));
        assert!(catalog.find(MediaItemId(5)).is_none());
    }
}
