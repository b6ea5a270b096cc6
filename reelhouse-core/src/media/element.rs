use thiserror::Error;

/// Raised by the host when programmatic playback is refused, typically by an
/// autoplay policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("playback rejected: {reason}")]
pub struct PlaybackRejected {
    pub reason: String,
}

impl PlaybackRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Host media element (a `<video>` tag, a native player surface, ...).
///
/// Assigning a source starts the network fetch, so callers must only do it
/// once the element is near the viewport.
pub trait MediaElement {
    fn set_source(&mut self, source: &str);

    /// Best-effort playback start.
    fn play(&mut self) -> Result<(), PlaybackRejected>;

    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);
}

impl<E: MediaElement + ?Sized> MediaElement for Box<E> {
    fn set_source(&mut self, source: &str) {
        (**self).set_source(source)
    }

    fn play(&mut self) -> Result<(), PlaybackRejected> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }
}
