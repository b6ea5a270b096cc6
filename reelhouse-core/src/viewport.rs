//! One-shot viewport proximity observer.
//!
//! The observer reports the first time an element comes within a margin of
//! the visible viewport and then detaches for good. Scrolling away and back
//! never re-triggers it.

use tracing::trace;

use crate::geometry::{Rect, RootMargin};

/// Lifecycle of a [`ViewportObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverState {
    #[default]
    Watching,
    /// Proximity was reported; the observer is detached.
    Fired,
    /// Torn down before proximity was ever reported.
    Disposed,
}

/// Entry produced the single time an observer fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityEntry {
    /// Element bounds at the time of the check, when known. Host-delivered
    /// signals carry no geometry.
    pub bounds: Option<Rect>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewportObserver {
    margin: RootMargin,
    state: ObserverState,
}

impl ViewportObserver {
    pub fn new(margin: RootMargin) -> Self {
        Self {
            margin,
            state: ObserverState::Watching,
        }
    }

    pub fn margin(&self) -> RootMargin {
        self.margin
    }

    pub fn state(&self) -> ObserverState {
        self.state
    }

    pub fn is_watching(&self) -> bool {
        self.state == ObserverState::Watching
    }

    /// Check element bounds against the margin-expanded viewport. Returns an
    /// entry only on the first intersection.
    pub fn check(
        &mut self,
        bounds: Rect,
        viewport: Rect,
    ) -> Option<ProximityEntry> {
        if !self.is_watching() {
            return None;
        }
        if !viewport.expand(self.margin).intersects(&bounds) {
            return None;
        }
        self.state = ObserverState::Fired;
        trace!(?bounds, ?viewport, "viewport observer fired");
        Some(ProximityEntry {
            bounds: Some(bounds),
        })
    }

    /// Accept an intersection entry delivered by the host platform.
    pub fn signal(&mut self) -> Option<ProximityEntry> {
        if !self.is_watching() {
            return None;
        }
        self.state = ObserverState::Fired;
        trace!("viewport observer fired from host signal");
        Some(ProximityEntry { bounds: None })
    }

    /// Detach without firing. Has no effect once fired.
    pub fn dispose(&mut self) {
        if self.is_watching() {
            self.state = ObserverState::Disposed;
        }
    }
}
