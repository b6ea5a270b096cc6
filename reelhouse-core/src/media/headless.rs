use super::element::{MediaElement, PlaybackRejected};

/// Autoplay rules a [`HeadlessElement`] enforces, mirroring what browsers do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    #[default]
    Allow,
    /// Only muted playback may start without a user gesture.
    MutedOnly,
    Deny,
}

/// In-memory media element used by the simulator and by tests.
///
/// It keeps counters of every call so callers can assert that sources are
/// assigned exactly once and that no play attempt is retried behind their
/// back.
#[derive(Debug, Clone, Default)]
pub struct HeadlessElement {
    policy: AutoplayPolicy,
    source: Option<String>,
    muted: bool,
    playing: bool,
    source_assignments: usize,
    play_attempts: usize,
    rejected_attempts: usize,
}

impl HeadlessElement {
    pub fn new(policy: AutoplayPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> AutoplayPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: AutoplayPolicy) {
        self.policy = policy;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn source_assignments(&self) -> usize {
        self.source_assignments
    }

    pub fn play_attempts(&self) -> usize {
        self.play_attempts
    }

    pub fn rejected_attempts(&self) -> usize {
        self.rejected_attempts
    }
}

impl MediaElement for HeadlessElement {
    fn set_source(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.source_assignments += 1;
        self.playing = false;
    }

    fn play(&mut self) -> Result<(), PlaybackRejected> {
        self.play_attempts += 1;
        let allowed = match self.policy {
            AutoplayPolicy::Allow => true,
            AutoplayPolicy::MutedOnly => self.muted,
            AutoplayPolicy::Deny => false,
        };
        if !allowed || self.source.is_none() {
            self.rejected_attempts += 1;
            return Err(PlaybackRejected::new(if self.source.is_none() {
                "no source assigned"
            } else {
                "autoplay policy"
            }));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
