//! Showcase: the page-level orchestrator.
//!
//! The showcase owns the [`PopupCoordinator`] and is therefore the only place
//! popup state is written. Carousels and galleries are mounted here; user
//! input (`request_*`) is routed through it.

use std::collections::HashMap;
use std::sync::Arc;

use reelhouse_model::{MediaCatalog, MediaItem, MediaItemId};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::carousel::{
    AdvanceOutcome, CarouselConfig, CarouselEngine, CarouselKey, Direction,
};
use crate::error::{Result, ShowcaseError};
use crate::gallery::{AudioMode, Gallery, GalleryKey};
use crate::geometry::RootMargin;
use crate::media::MediaElement;
use crate::popup::{
    PopupCoordinator, PopupEvent, PopupOrigin, PopupSelection, PopupSession,
    PopupSubscription,
};

/// Result of a selection request.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Opened(Arc<PopupSession>),
    /// Only the centered carousel item can be opened; bring it to the center
    /// first.
    NotActive {
        requested: MediaItemId,
        active: MediaItemId,
    },
    UnknownItem(MediaItemId),
}

impl SelectOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, SelectOutcome::Opened(_))
    }
}

#[derive(Debug, Default)]
pub struct Showcase {
    popup: PopupCoordinator,
    carousels: HashMap<CarouselKey, CarouselEngine>,
    galleries: HashMap<GalleryKey, Arc<MediaCatalog>>,
}

impl Showcase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn popup(&self) -> PopupSelection {
        self.popup.current()
    }

    pub fn popup_subscription(&self) -> PopupSubscription {
        self.popup.subscribe()
    }

    pub fn popup_events(&self) -> broadcast::Receiver<PopupEvent> {
        self.popup.events()
    }

    /// Start a carousel. Mounting over an existing key tears the old one
    /// down first.
    pub fn mount_carousel(
        &mut self,
        key: CarouselKey,
        catalog: MediaCatalog,
        config: CarouselConfig,
    ) -> Result<&CarouselEngine> {
        let popup = self.popup.subscribe();
        let engine =
            CarouselEngine::spawn(key.clone(), catalog, config, popup)?;
        if self.carousels.insert(key.clone(), engine).is_some() {
            warn!(carousel = %key, "carousel remounted; old instance dropped");
        }
        self.carousels
            .get(&key)
            .ok_or(ShowcaseError::UnknownCarousel(key))
    }

    /// Stop a carousel and cancel its timers.
    pub async fn unmount_carousel(&mut self, key: &CarouselKey) -> bool {
        match self.carousels.remove(key) {
            Some(engine) => {
                engine.shutdown().await;
                true
            }
            None => false,
        }
    }

    pub fn carousel(&self, key: &CarouselKey) -> Option<&CarouselEngine> {
        self.carousels.get(key)
    }

    pub fn carousel_keys(&self) -> impl Iterator<Item = &CarouselKey> {
        self.carousels.keys()
    }

    /// Register a gallery catalog and build its view.
    pub fn mount_gallery<E, F>(
        &mut self,
        key: GalleryKey,
        catalog: MediaCatalog,
        audio: AudioMode,
        margin: RootMargin,
        make_element: F,
    ) -> Gallery<E>
    where
        E: MediaElement,
        F: FnMut(&MediaItem) -> E,
    {
        let gallery = Gallery::new(
            key.clone(),
            &catalog,
            audio,
            margin,
            self.popup.subscribe(),
            make_element,
        );
        info!(gallery = %key, items = catalog.len(), "gallery mounted");
        self.galleries.insert(key, Arc::new(catalog));
        gallery
    }

    pub fn unmount_gallery(&mut self, key: &GalleryKey) -> bool {
        self.galleries.remove(key).is_some()
    }

    pub async fn request_advance(
        &self,
        key: &CarouselKey,
        direction: Direction,
    ) -> Result<AdvanceOutcome> {
        self.engine(key)?.advance(direction).await
    }

    /// Open the popup on a carousel item. Requests for anything but the
    /// centered item are ignored.
    pub fn request_select(
        &mut self,
        key: &CarouselKey,
        id: MediaItemId,
    ) -> Result<SelectOutcome> {
        let engine = self.engine(key)?;
        if engine.catalog().find(id).is_none() {
            return Ok(SelectOutcome::UnknownItem(id));
        }
        let active = engine
            .active_item()
            .cloned()
            .ok_or_else(|| ShowcaseError::UnknownCarousel(key.clone()))?;
        if active.id() != id {
            debug!(
                carousel = %key,
                requested = %id,
                active = %active.id(),
                "select ignored for off-center item"
            );
            return Ok(SelectOutcome::NotActive {
                requested: id,
                active: active.id(),
            });
        }
        let session = self
            .popup
            .select(active, PopupOrigin::Carousel(key.clone()));
        Ok(SelectOutcome::Opened(session))
    }

    /// Open the popup on a gallery card. Any card is selectable.
    pub fn request_select_from_gallery(
        &mut self,
        key: &GalleryKey,
        id: MediaItemId,
    ) -> Result<SelectOutcome> {
        let catalog = self
            .galleries
            .get(key)
            .ok_or_else(|| ShowcaseError::UnknownGallery(key.clone()))?;
        let Some(item) = catalog.find(id).cloned() else {
            return Ok(SelectOutcome::UnknownItem(id));
        };
        let origin = PopupOrigin::Gallery(key.clone());
        let session = self.popup.select(item, origin);
        Ok(SelectOutcome::Opened(session))
    }

    /// Dismiss the popup (close button or backdrop click).
    pub fn request_close_popup(&mut self) -> Option<Arc<PopupSession>> {
        self.popup.clear()
    }

    /// Stop every carousel task.
    pub async fn shutdown(mut self) {
        for (_, engine) in self.carousels.drain() {
            engine.shutdown().await;
        }
    }

    fn engine(&self, key: &CarouselKey) -> Result<&CarouselEngine> {
        self.carousels
            .get(key)
            .ok_or_else(|| ShowcaseError::UnknownCarousel(key.clone()))
    }
}
