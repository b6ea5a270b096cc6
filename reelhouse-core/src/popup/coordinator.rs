//! Process-wide popup selection.
//!
//! One [`PopupCoordinator`] owns the slot and is the only writer. Every
//! carousel and gallery holds a [`PopupSubscription`] that yields immutable
//! [`PopupSelection`] snapshots; transitions are additionally fanned out as
//! [`PopupEvent`]s for observers that care about each individual change.

use std::fmt;
use std::sync::Arc;

use reelhouse_model::MediaItem;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};
use uuid::Uuid;

use crate::carousel::CarouselKey;
use crate::gallery::GalleryKey;

const EVENT_CAPACITY: usize = 64;

/// Identifier of one popup opening. A re-selection of the same item gets a
/// fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupSessionId(pub Uuid);

impl PopupSessionId {
    pub fn new() -> Self {
        PopupSessionId(Uuid::now_v7())
    }
}

impl Default for PopupSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PopupSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a selection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOrigin {
    Carousel(CarouselKey),
    Gallery(GalleryKey),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupSession {
    pub id: PopupSessionId,
    /// The popup's own copy of the item.
    pub item: MediaItem,
    pub origin: PopupOrigin,
}

/// Snapshot of the popup slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupSelection {
    session: Option<Arc<PopupSession>>,
    revision: u64,
}

impl PopupSelection {
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Number of accepted `select`/`clear` calls so far. The watch channel
    /// keeps only the latest value, so readers compare revisions to notice
    /// a selection that opened and closed between two observations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn session(&self) -> Option<&Arc<PopupSession>> {
        self.session.as_ref()
    }

    pub fn item(&self) -> Option<&MediaItem> {
        self.session.as_deref().map(|session| &session.item)
    }
}

/// One notification per accepted `select`/`clear` call.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupEvent {
    Opened {
        current: Arc<PopupSession>,
    },
    Replaced {
        previous: Arc<PopupSession>,
        current: Arc<PopupSession>,
    },
    Closed {
        previous: Arc<PopupSession>,
    },
}

#[derive(Debug)]
pub struct PopupCoordinator {
    state: watch::Sender<PopupSelection>,
    events: broadcast::Sender<PopupEvent>,
}

impl Default for PopupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupCoordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PopupSelection::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { state, events }
    }

    pub fn subscribe(&self) -> PopupSubscription {
        PopupSubscription {
            rx: self.state.subscribe(),
        }
    }

    pub fn events(&self) -> broadcast::Receiver<PopupEvent> {
        self.events.subscribe()
    }

    pub fn current(&self) -> PopupSelection {
        self.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    /// Open the popup on `item`, replacing any previous selection.
    pub fn select(
        &mut self,
        item: MediaItem,
        origin: PopupOrigin,
    ) -> Arc<PopupSession> {
        let current = Arc::new(PopupSession {
            id: PopupSessionId::new(),
            item,
            origin,
        });
        let previous = self.state.send_replace(PopupSelection {
            session: Some(Arc::clone(&current)),
            revision: self.next_revision(),
        });
        let event = match previous.session {
            Some(previous) => {
                debug!(
                    previous = %previous.item.id(),
                    current = %current.item.id(),
                    "popup selection replaced"
                );
                PopupEvent::Replaced {
                    previous,
                    current: Arc::clone(&current),
                }
            }
            None => {
                info!(
                    item = %current.item.id(),
                    session = %current.id,
                    "popup opened"
                );
                PopupEvent::Opened {
                    current: Arc::clone(&current),
                }
            }
        };
        // No subscribers is fine.
        let _ = self.events.send(event);
        current
    }

    /// Close the popup. Clearing an empty slot is a no-op and emits nothing.
    pub fn clear(&mut self) -> Option<Arc<PopupSession>> {
        if !self.is_open() {
            return None;
        }
        let cleared = PopupSelection {
            session: None,
            revision: self.next_revision(),
        };
        let previous = self.state.send_replace(cleared).session?;
        info!(
            item = %previous.item.id(),
            session = %previous.id,
            "popup closed"
        );
        let _ = self.events.send(PopupEvent::Closed {
            previous: Arc::clone(&previous),
        });
        Some(previous)
    }

    fn next_revision(&self) -> u64 {
        self.state.borrow().revision + 1
    }
}

/// Read side of the popup slot.
#[derive(Debug, Clone)]
pub struct PopupSubscription {
    rx: watch::Receiver<PopupSelection>,
}

impl PopupSubscription {
    /// Latest selection, marking it as seen.
    pub fn current(&mut self) -> PopupSelection {
        self.rx.borrow_and_update().clone()
    }

    /// Latest selection without marking it as seen.
    pub fn peek(&self) -> PopupSelection {
        self.rx.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.rx.borrow().is_open()
    }

    pub fn revision(&self) -> u64 {
        self.rx.borrow().revision
    }

    /// Whether a change arrived since the last `current`/`changed` call.
    /// False once the coordinator is gone.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change. `None` once the coordinator is dropped.
    pub async fn changed(&mut self) -> Option<PopupSelection> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32) -> MediaItem {
        MediaItem::vertical(id, format!("/vertical-vids/{id}.mp4")).unwrap()
    }

    fn origin() -> PopupOrigin {
        PopupOrigin::Carousel(CarouselKey::Work)
    }

    #[test]
    fn last_write_wins() {
        let mut coordinator = PopupCoordinator::new();
        let mut sub = coordinator.subscribe();

        coordinator.select(item(1), origin());
        coordinator.select(item(2), origin());

        assert!(sub.has_changed());
        let current = sub.current();
        assert_eq!(
            current.item().map(MediaItem::id),
            Some(reelhouse_model::MediaItemId(2))
        );
        assert!(!sub.has_changed());
    }

    #[test]
    fn one_event_per_call() {
        let mut coordinator = PopupCoordinator::new();
        let mut events = coordinator.events();

        let first = coordinator.select(item(1), origin());
        let second = coordinator.select(item(2), origin());
        coordinator.clear();
        coordinator.clear();

        assert_eq!(
            events.try_recv().unwrap(),
            PopupEvent::Opened {
                current: first.clone()
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            PopupEvent::Replaced {
                previous: first,
                current: second.clone()
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            PopupEvent::Closed { previous: second }
        );
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn reselecting_the_same_item_starts_a_new_session() {
        let mut coordinator = PopupCoordinator::new();
        let a = coordinator.select(item(3), origin());
        let b = coordinator.select(item(3), origin());
        assert_ne!(a.id, b.id);
        assert_eq!(a.item, b.item);
    }

    #[test]
    fn clear_on_empty_slot_does_not_notify() {
        let mut coordinator = PopupCoordinator::new();
        let sub = coordinator.subscribe();
        assert!(coordinator.clear().is_none());
        assert!(!sub.has_changed());
        assert_eq!(sub.revision(), 0);
    }

    #[test]
    fn open_and_close_between_reads_is_still_visible() {
        let mut coordinator = PopupCoordinator::new();
        let mut sub = coordinator.subscribe();
        let before = sub.current();

        coordinator.select(item(1), origin());
        coordinator.clear();

        let after = sub.current();
        assert!(!after.is_open());
        assert_eq!(after.revision(), before.revision() + 2);
        assert_ne!(after, before);
    }
}
