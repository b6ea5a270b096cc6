//! Media wrapper that defers loading until the element nears the viewport.
//!
//! Playback follows a single rule, re-evaluated whenever one of its inputs
//! changes value: play iff the source is loaded, playback is requested and
//! the parent has not forced a pause.

use reelhouse_model::MediaItem;
use tracing::{debug, trace};

use super::element::MediaElement;
use crate::geometry::{Rect, RootMargin};
use crate::viewport::ViewportObserver;

/// Loading progress. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LoadState {
    #[default]
    Idle,
    InView,
    Loaded,
}

/// Parent-controlled playback inputs. `forced_pause` overrides any local
/// intent to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackIntent {
    pub muted: bool,
    pub forced_pause: bool,
}

impl Default for PlaybackIntent {
    fn default() -> Self {
        Self {
            muted: true,
            forced_pause: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    /// The host refused the last play attempt. The element stays paused until
    /// an input changes.
    Blocked,
}

#[derive(Debug)]
pub struct LazyMedia<E> {
    element: E,
    source: String,
    assigned_source: Option<String>,
    observer: ViewportObserver,
    load_state: LoadState,
    should_play: bool,
    intent: PlaybackIntent,
    playback: PlaybackState,
    disposed: bool,
}

impl<E: MediaElement> LazyMedia<E> {
    /// Wrap `element`, starting muted with autoplay requested.
    pub fn new(
        mut element: E,
        source: impl Into<String>,
        margin: RootMargin,
    ) -> Self {
        let intent = PlaybackIntent::default();
        element.set_muted(intent.muted);
        Self {
            element,
            source: source.into(),
            assigned_source: None,
            observer: ViewportObserver::new(margin),
            load_state: LoadState::Idle,
            should_play: true,
            intent,
            playback: PlaybackState::Paused,
            disposed: false,
        }
    }

    pub fn for_item(element: E, item: &MediaItem, margin: RootMargin) -> Self {
        Self::new(element, item.source_url(), margin)
    }

    /// Layout or scroll changed; loads the source on first proximity.
    pub fn on_viewport_change(
        &mut self,
        bounds: Rect,
        viewport: Rect,
    ) -> LoadState {
        if self.observer.check(bounds, viewport).is_some() {
            self.enter_view();
        }
        self.load_state
    }

    /// Host-delivered intersection signal. Repeated signals are ignored.
    pub fn notify_intersection(&mut self) -> LoadState {
        if self.observer.signal().is_some() {
            self.enter_view();
        }
        self.load_state
    }

    pub fn set_should_play(&mut self, should_play: bool) {
        if self.should_play != should_play {
            self.should_play = should_play;
            self.reconcile();
        }
    }

    pub fn set_forced_pause(&mut self, forced_pause: bool) {
        if self.intent.forced_pause != forced_pause {
            self.intent.forced_pause = forced_pause;
            self.reconcile();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.intent.muted != muted {
            self.intent.muted = muted;
            if !self.disposed {
                self.element.set_muted(muted);
            }
            self.reconcile();
        }
    }

    /// Flip the local mute state; returns the new value.
    pub fn toggle_muted(&mut self) -> bool {
        let muted = !self.intent.muted;
        self.set_muted(muted);
        muted
    }

    /// Apply both parent inputs with a single re-evaluation.
    pub fn set_intent(&mut self, intent: PlaybackIntent) {
        if self.intent == intent {
            return;
        }
        if self.intent.muted != intent.muted && !self.disposed {
            self.element.set_muted(intent.muted);
        }
        self.intent = intent;
        self.reconcile();
    }

    /// Tear down: stop observing and stop playback. Final; later input
    /// changes are recorded but never touch the element again.
    pub fn dispose(&mut self) {
        self.observer.dispose();
        if self.playback == PlaybackState::Playing {
            self.element.pause();
        }
        self.playback = PlaybackState::Paused;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    pub fn intent(&self) -> PlaybackIntent {
        self.intent
    }

    pub fn should_play(&self) -> bool {
        self.should_play
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source currently assigned to the element, if loading has started.
    pub fn assigned_source(&self) -> Option<&str> {
        self.assigned_source.as_deref()
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn into_element(self) -> E {
        self.element
    }

    fn enter_view(&mut self) {
        if self.load_state == LoadState::Idle {
            self.load_state = LoadState::InView;
        }
        self.assign_source();
    }

    fn assign_source(&mut self) {
        if self.disposed {
            return;
        }
        if self.assigned_source.as_deref() == Some(self.source.as_str()) {
            return;
        }
        self.element.set_source(&self.source);
        self.assigned_source = Some(self.source.clone());
        self.load_state = LoadState::Loaded;
        debug!(source = %self.source, "lazy media source assigned");
        self.reconcile();
    }

    fn wants_playback(&self) -> bool {
        self.load_state == LoadState::Loaded
            && self.should_play
            && !self.intent.forced_pause
    }

    fn reconcile(&mut self) {
        if self.disposed {
            return;
        }
        if self.wants_playback() {
            if self.playback == PlaybackState::Playing {
                return;
            }
            match self.element.play() {
                Ok(()) => {
                    self.playback = PlaybackState::Playing;
                    trace!(source = %self.source, "playback started");
                }
                Err(rejected) => {
                    // Autoplay refusals are expected; stay paused.
                    debug!(
                        source = %self.source,
                        %rejected,
                        "playback not started"
                    );
                    self.playback = PlaybackState::Blocked;
                }
            }
        } else {
            if self.playback == PlaybackState::Playing {
                self.element.pause();
            }
            self.playback = PlaybackState::Paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{AutoplayPolicy, HeadlessElement};

    fn lazy(policy: AutoplayPolicy) -> LazyMedia<HeadlessElement> {
        LazyMedia::new(
            HeadlessElement::new(policy),
            "/vertical-vids/1.mp4",
            RootMargin::default(),
        )
    }

    #[test]
    fn no_source_before_proximity() {
        let mut media = lazy(AutoplayPolicy::Allow);
        let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let far = Rect::new(0.0, 3000.0, 280.0, 500.0);

        assert_eq!(media.on_viewport_change(far, viewport), LoadState::Idle);
        assert!(media.element().source().is_none());
        assert!(media.assigned_source().is_none());
        assert!(!media.is_playing());
    }

    #[test]
    fn proximity_loads_and_plays() {
        let mut media = lazy(AutoplayPolicy::Allow);
        let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let near = Rect::new(0.0, 800.0, 280.0, 500.0);

        assert_eq!(media.on_viewport_change(near, viewport), LoadState::Loaded);
        assert_eq!(media.element().source(), Some("/vertical-vids/1.mp4"));
        assert!(media.is_playing());
    }

    #[test]
    fn should_play_false_keeps_loaded_media_paused() {
        let mut media = lazy(AutoplayPolicy::Allow);
        media.set_should_play(false);
        media.notify_intersection();
        assert_eq!(media.load_state(), LoadState::Loaded);
        assert!(!media.is_playing());

        media.set_should_play(true);
        assert!(media.is_playing());
    }

    #[test]
    fn rejected_play_is_not_retried_until_an_input_changes() {
        let mut media = lazy(AutoplayPolicy::Deny);
        media.notify_intersection();
        assert_eq!(media.playback(), PlaybackState::Blocked);
        assert_eq!(media.element().play_attempts(), 1);

        // re-sending identical inputs is not a change
        media.set_should_play(true);
        media.set_forced_pause(false);
        assert_eq!(media.element().play_attempts(), 1);

        media.element_mut().set_policy(AutoplayPolicy::Allow);
        media.toggle_muted();
        assert_eq!(media.element().play_attempts(), 2);
        assert!(media.is_playing());
    }

    #[test]
    fn muted_only_policy_blocks_unmuted_start() {
        let mut media = lazy(AutoplayPolicy::MutedOnly);
        media.set_muted(false);
        media.notify_intersection();
        assert_eq!(media.playback(), PlaybackState::Blocked);

        media.set_muted(true);
        assert!(media.is_playing());
        assert!(media.element().is_muted());
    }

    #[test]
    fn dispose_pauses_and_stops_observing() {
        let mut media = lazy(AutoplayPolicy::Allow);
        media.notify_intersection();
        assert!(media.is_playing());

        media.dispose();
        assert!(!media.element().is_playing());
        assert_eq!(media.playback(), PlaybackState::Paused);
    }

    #[test]
    fn disposed_before_proximity_never_loads() {
        let mut media = lazy(AutoplayPolicy::Allow);
        media.dispose();
        assert_eq!(media.notify_intersection(), LoadState::Idle);
        assert_eq!(media.element().source_assignments(), 0);
    }

    #[test]
    fn disposed_media_ignores_later_inputs() {
        let mut media = lazy(AutoplayPolicy::Allow);
        media.notify_intersection();
        media.set_forced_pause(true);
        media.dispose();
        assert!(media.is_disposed());

        media.set_intent(PlaybackIntent {
            muted: false,
            forced_pause: false,
        });
        media.set_should_play(true);
        media.toggle_muted();

        assert_eq!(media.playback(), PlaybackState::Paused);
        assert!(!media.element().is_playing());
        assert!(media.element().is_muted());
        assert_eq!(media.element().play_attempts(), 1);
    }
}
