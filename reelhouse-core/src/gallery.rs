//! Static grids of lazily loaded video cards.
//!
//! Gallery cards autoplay once near the viewport and follow the global popup:
//! while any popup is open every card is force-paused. Hover-to-unmute cards
//! (the CGI showcase) are audible only while hovered; the featured grid keeps
//! a local mute toggle per card instead.

use std::fmt;

use reelhouse_model::{MediaCatalog, MediaItem, MediaItemId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Rect, RootMargin};
use crate::media::{LazyMedia, MediaElement};
use crate::popup::PopupSubscription;

/// Unique key for galleries mounted on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GalleryKey {
    /// Horizontal featured videos with their own mute buttons.
    Featured,
    /// CGI showcase cards, unmuted on hover.
    Cgi,
    Custom(String),
}

impl fmt::Display for GalleryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryKey::Featured => f.write_str("featured"),
            GalleryKey::Cgi => f.write_str("cgi"),
            GalleryKey::Custom(name) => f.write_str(name),
        }
    }
}

impl From<&str> for GalleryKey {
    fn from(value: &str) -> Self {
        match value {
            "featured" => GalleryKey::Featured,
            "cgi" => GalleryKey::Cgi,
            other => GalleryKey::Custom(other.to_string()),
        }
    }
}

/// How card audio is controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    /// Each card has its own mute toggle.
    #[default]
    Toggle,
    /// Cards are muted unless hovered.
    Hover,
}

#[derive(Debug)]
pub struct GalleryCard<E> {
    item: MediaItem,
    media: LazyMedia<E>,
}

impl<E> GalleryCard<E> {
    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    pub fn media(&self) -> &LazyMedia<E> {
        &self.media
    }
}

#[derive(Debug)]
pub struct Gallery<E> {
    key: GalleryKey,
    audio: AudioMode,
    cards: Vec<GalleryCard<E>>,
    popup: PopupSubscription,
    popup_open: bool,
    hovered: Option<MediaItemId>,
}

impl<E: MediaElement> Gallery<E> {
    pub fn new<F>(
        key: GalleryKey,
        catalog: &MediaCatalog,
        audio: AudioMode,
        margin: RootMargin,
        popup: PopupSubscription,
        mut make_element: F,
    ) -> Self
    where
        F: FnMut(&MediaItem) -> E,
    {
        let cards = catalog
            .iter()
            .map(|item| GalleryCard {
                item: item.clone(),
                media: LazyMedia::for_item(make_element(item), item, margin),
            })
            .collect();
        let mut gallery = Self {
            key,
            audio,
            cards,
            popup,
            popup_open: false,
            hovered: None,
        };
        gallery.sync_popup();
        gallery
    }

    pub fn key(&self) -> &GalleryKey {
        &self.key
    }

    pub fn cards(&self) -> &[GalleryCard<E>] {
        &self.cards
    }

    pub fn card(&self, id: MediaItemId) -> Option<&GalleryCard<E>> {
        self.cards.iter().find(|card| card.item.id() == id)
    }

    /// Pull the latest popup state and force-pause (or release) every card.
    /// Returns whether the popup is open.
    pub fn sync_popup(&mut self) -> bool {
        let open = self.popup.current().is_open();
        if open != self.popup_open {
            self.popup_open = open;
            debug!(
                gallery = %self.key,
                popup_open = open,
                "gallery following popup"
            );
        }
        for card in &mut self.cards {
            card.media.set_forced_pause(open);
        }
        open
    }

    /// Wait for the popup to change, then sync. `None` once the coordinator
    /// is gone.
    pub async fn popup_changed(&mut self) -> Option<bool> {
        self.popup.changed().await?;
        Some(self.sync_popup())
    }

    pub fn on_viewport_change(&mut self, viewport: Rect, bounds: &[Rect]) {
        for (card, bounds) in self.cards.iter_mut().zip(bounds) {
            card.media.on_viewport_change(*bounds, viewport);
        }
    }

    pub fn notify_intersection(&mut self, id: MediaItemId) {
        if let Some(card) = self.card_mut(id) {
            card.media.notify_intersection();
        }
    }

    /// Pointer entered (`Some`) or left (`None`) a card. Only affects audio in
    /// [`AudioMode::Hover`].
    pub fn set_hovered(&mut self, id: Option<MediaItemId>) {
        self.hovered = id;
        if self.audio != AudioMode::Hover {
            return;
        }
        for card in &mut self.cards {
            card.media.set_muted(Some(card.item.id()) != id);
        }
    }

    pub fn hovered(&self) -> Option<MediaItemId> {
        self.hovered
    }

    /// Flip a card's local mute button. Returns the new value, or `None` for
    /// unknown ids and hover-controlled galleries.
    pub fn toggle_muted(&mut self, id: MediaItemId) -> Option<bool> {
        if self.audio != AudioMode::Toggle {
            return None;
        }
        self.card_mut(id).map(|card| card.media.toggle_muted())
    }

    pub fn dispose(&mut self) {
        for card in &mut self.cards {
            card.media.dispose();
        }
    }

    fn card_mut(&mut self, id: MediaItemId) -> Option<&mut GalleryCard<E>> {
        self.cards.iter_mut().find(|card| card.item.id() == id)
    }
}
