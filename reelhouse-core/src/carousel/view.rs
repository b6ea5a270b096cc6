//! CarouselView: lazily loaded media bound to a carousel engine.

use reelhouse_model::MediaItem;
use tokio::sync::watch;

use super::engine::{CarouselEngine, CarouselSnapshot};
use super::transform::{ItemTransform, TransformStyle};
use super::types::CarouselKey;
use crate::geometry::{Rect, RootMargin};
use crate::media::{LazyMedia, MediaElement};

/// One media element per carousel item. `sync` pushes the engine's latest
/// playback intents into the elements.
#[derive(Debug)]
pub struct CarouselView<E> {
    key: CarouselKey,
    style: TransformStyle,
    snapshot: watch::Receiver<CarouselSnapshot>,
    media: Vec<LazyMedia<E>>,
}

impl<E: MediaElement> CarouselView<E> {
    pub fn new<F>(
        engine: &CarouselEngine,
        margin: RootMargin,
        mut make_element: F,
    ) -> Self
    where
        F: FnMut(&MediaItem) -> E,
    {
        let media = engine
            .catalog()
            .iter()
            .map(|item| LazyMedia::for_item(make_element(item), item, margin))
            .collect();
        let mut view = Self {
            key: engine.key().clone(),
            style: engine.config().style,
            snapshot: engine.subscribe(),
            media,
        };
        view.sync();
        view
    }

    pub fn key(&self) -> &CarouselKey {
        &self.key
    }

    /// Apply the latest snapshot to every element.
    pub fn sync(&mut self) -> CarouselSnapshot {
        let snapshot = self.snapshot.borrow_and_update().clone();
        for (index, media) in self.media.iter_mut().enumerate() {
            media.set_intent(snapshot.playback_intent(index));
        }
        snapshot
    }

    /// Wait for the engine to publish, then sync. `None` once the engine is
    /// gone.
    pub async fn changed(&mut self) -> Option<CarouselSnapshot> {
        self.snapshot.changed().await.ok()?;
        Some(self.sync())
    }

    pub fn transforms(&self) -> Vec<ItemTransform> {
        self.snapshot.borrow().transforms(&self.style)
    }

    /// Feed layout to every element; `bounds[i]` belongs to item `i`.
    pub fn on_viewport_change(&mut self, viewport: Rect, bounds: &[Rect]) {
        for (media, bounds) in self.media.iter_mut().zip(bounds) {
            media.on_viewport_change(*bounds, viewport);
        }
    }

    pub fn notify_intersection(&mut self, index: usize) {
        if let Some(media) = self.media.get_mut(index) {
            media.notify_intersection();
        }
    }

    pub fn media(&self, index: usize) -> Option<&LazyMedia<E>> {
        self.media.get(index)
    }

    pub fn media_mut(&mut self, index: usize) -> Option<&mut LazyMedia<E>> {
        self.media.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn dispose(&mut self) {
        for media in &mut self.media {
            media.dispose();
        }
    }
}
