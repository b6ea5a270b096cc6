//! Popup player: the full-screen copy of the selected item.
//!
//! It owns a separate media element and its own mute state, so nothing the
//! user does here leaks into the inline carousel card of the same item, and
//! vice versa.

use std::sync::Arc;

use reelhouse_model::MediaItem;
use tracing::debug;

use super::coordinator::{PopupSession, PopupSessionId};
use crate::geometry::RootMargin;
use crate::media::{LazyMedia, MediaElement, PlaybackState};

#[derive(Debug)]
pub struct PopupPlayer<E> {
    session: Arc<PopupSession>,
    media: LazyMedia<E>,
}

impl<E: MediaElement> PopupPlayer<E> {
    /// Open the popup copy. The popup is on screen by definition, so loading
    /// starts immediately and playback starts with sound.
    pub fn open(session: Arc<PopupSession>, element: E) -> Self {
        let mut media =
            LazyMedia::for_item(element, &session.item, RootMargin::ZERO);
        media.set_muted(false);
        media.notify_intersection();
        debug!(
            session = %session.id,
            item = %session.item.id(),
            playback = ?media.playback(),
            "popup player opened"
        );
        Self { session, media }
    }

    pub fn session_id(&self) -> PopupSessionId {
        self.session.id
    }

    pub fn item(&self) -> &MediaItem {
        &self.session.item
    }

    pub fn is_muted(&self) -> bool {
        self.media.intent().muted
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.media.toggle_muted()
    }

    pub fn playback(&self) -> PlaybackState {
        self.media.playback()
    }

    pub fn media(&self) -> &LazyMedia<E> {
        &self.media
    }

    /// Dismiss: stop playback and hand the element back to the host.
    pub fn close(mut self) -> E {
        self.media.dispose();
        debug!(session = %self.session.id, "popup player closed");
        self.media.into_element()
    }
}
