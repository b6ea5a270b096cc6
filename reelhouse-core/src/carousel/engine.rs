//! CarouselEngine: the timer-driven shell around [`CarouselState`].
//!
//! Each engine is one tokio task that processes commands, popup selection
//! changes and its two deadlines (transition settle, auto-advance) one event
//! at a time. The task owns at most one pending deadline of each kind;
//! rescheduling replaces the previous deadline. Dropping the
//! [`CarouselEngine`] handle aborts the task, so no timer can fire after
//! teardown.

use std::sync::Arc;

use reelhouse_model::{MediaCatalog, MediaItem};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, trace};

use super::state::{AdvanceOutcome, CarouselState};
use super::transform::{
    ItemTransform, TransformStyle, circular_offset, item_transform,
};
use super::types::{CarouselConfig, CarouselKey, Direction};
use crate::error::{Result, ShowcaseError};
use crate::media::PlaybackIntent;
use crate::popup::{PopupSelection, PopupSubscription};

const COMMAND_CAPACITY: usize = 64;

/// Immutable copy of a carousel's observable state, published after every
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot {
    pub key: CarouselKey,
    pub len: usize,
    pub active_index: usize,
    pub is_transitioning: bool,
    pub auto_advance_enabled: bool,
    /// An auto-advance deadline is currently scheduled.
    pub auto_advance_pending: bool,
    /// The global popup is open; auto-advance is held.
    pub suspended: bool,
    pub center_muted: bool,
    /// Incremented on every publication.
    pub revision: u64,
}

impl CarouselSnapshot {
    pub fn is_active(&self, index: usize) -> bool {
        index < self.len
            && circular_offset(index, self.active_index, self.len) == 0
    }

    pub fn transform(
        &self,
        index: usize,
        style: &TransformStyle,
    ) -> ItemTransform {
        item_transform(index, self.active_index, self.len, style)
    }

    pub fn transforms(&self, style: &TransformStyle) -> Vec<ItemTransform> {
        (0..self.len).map(|index| self.transform(index, style)).collect()
    }

    /// Inputs for the media element of item `index`. Only the centered item
    /// may play, and only while no popup is open; it is audible only when
    /// center mute is off.
    pub fn playback_intent(&self, index: usize) -> PlaybackIntent {
        let active = self.is_active(index);
        PlaybackIntent {
            muted: !active || self.center_muted,
            forced_pause: !active || self.suspended,
        }
    }
}

#[derive(Debug)]
enum CarouselCommand {
    Advance {
        direction: Direction,
        reply: oneshot::Sender<AdvanceOutcome>,
    },
    SetAutoAdvance {
        enabled: bool,
        reply: oneshot::Sender<()>,
    },
    ToggleCenterMute {
        reply: oneshot::Sender<bool>,
    },
    Shutdown,
}

/// Handle to a running carousel task.
#[derive(Debug)]
pub struct CarouselEngine {
    key: CarouselKey,
    catalog: Arc<MediaCatalog>,
    config: CarouselConfig,
    commands: mpsc::Sender<CarouselCommand>,
    snapshot: watch::Receiver<CarouselSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl CarouselEngine {
    /// Validate the configuration and start the carousel task on the current
    /// tokio runtime.
    pub fn spawn(
        key: CarouselKey,
        catalog: impl Into<Arc<MediaCatalog>>,
        config: CarouselConfig,
        popup: PopupSubscription,
    ) -> Result<Self> {
        let catalog = catalog.into();
        config.validate()?;
        let state = CarouselState::new(
            catalog.len(),
            config.start_index,
            config.auto_advance,
        )?;

        let (commands, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let mut driver = CarouselDriver {
            key: key.clone(),
            config,
            state,
            popup_detached: false,
            popup_revision: popup.revision(),
            suspended: popup.is_open(),
            popup,
            center_muted: config.center_muted,
            settle_at: None,
            auto_advance_at: None,
            revision: 0,
            commands: command_rx,
            snapshot_tx: None,
        };
        driver.rearm_auto_advance(Instant::now());
        let (snapshot_tx, snapshot) = watch::channel(driver.snapshot());
        driver.snapshot_tx = Some(snapshot_tx);

        info!(
            carousel = %key,
            items = catalog.len(),
            start = driver.state.active_index(),
            interval_ms = config.auto_advance_interval.as_millis() as u64,
            "carousel mounted"
        );
        let task = tokio::spawn(driver.run());

        Ok(Self {
            key,
            catalog,
            config,
            commands,
            snapshot,
            task: Some(task),
        })
    }

    pub fn key(&self) -> &CarouselKey {
        &self.key
    }

    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshot.clone()
    }

    /// Item currently in the center.
    pub fn active_item(&self) -> Option<&MediaItem> {
        let index = self.snapshot.borrow().active_index;
        self.catalog.get(index)
    }

    pub fn transforms(&self) -> Vec<ItemTransform> {
        self.snapshot.borrow().transforms(&self.config.style)
    }

    pub async fn advance(
        &self,
        direction: Direction,
    ) -> Result<AdvanceOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(CarouselCommand::Advance { direction, reply }).await?;
        rx.await.map_err(|_| self.stopped())
    }

    pub async fn set_auto_advance(&self, enabled: bool) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(CarouselCommand::SetAutoAdvance { enabled, reply })
            .await?;
        rx.await.map_err(|_| self.stopped())
    }

    /// Flip center mute; returns the new value.
    pub async fn toggle_center_mute(&self) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(CarouselCommand::ToggleCenterMute { reply }).await?;
        rx.await.map_err(|_| self.stopped())
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(CarouselCommand::Shutdown).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    async fn send(&self, command: CarouselCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| self.stopped())
    }

    fn stopped(&self) -> ShowcaseError {
        ShowcaseError::EngineStopped(self.key.clone())
    }
}

impl Drop for CarouselEngine {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(carousel = %self.key, "carousel unmounted");
        }
    }
}

struct CarouselDriver {
    key: CarouselKey,
    config: CarouselConfig,
    state: CarouselState,
    popup: PopupSubscription,
    popup_detached: bool,
    /// Last popup revision acted on.
    popup_revision: u64,
    suspended: bool,
    center_muted: bool,
    settle_at: Option<Instant>,
    auto_advance_at: Option<Instant>,
    revision: u64,
    commands: mpsc::Receiver<CarouselCommand>,
    snapshot_tx: Option<watch::Sender<CarouselSnapshot>>,
}

impl CarouselDriver {
    async fn run(mut self) {
        loop {
            let settle_at = self.settle_at;
            let auto_advance_at = self.auto_advance_at;
            let watch_popup = !self.popup_detached;

            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(CarouselCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },

                selection = self.popup.changed(), if watch_popup => {
                    self.on_popup_change(selection);
                }

                _ = sleep_until_some(settle_at) => self.finish_transition(),

                _ = sleep_until_some(auto_advance_at) => self.auto_advance(),
            }
        }
        debug!(carousel = %self.key, "carousel task stopped");
    }

    fn handle_command(&mut self, command: CarouselCommand) {
        match command {
            CarouselCommand::Advance { direction, reply } => {
                let outcome = self.advance(direction, "manual");
                let _ = reply.send(outcome);
            }
            CarouselCommand::SetAutoAdvance { enabled, reply } => {
                if self.state.auto_advance_enabled() != enabled {
                    self.state.set_auto_advance(enabled);
                    self.rearm_auto_advance(Instant::now());
                    self.publish();
                }
                let _ = reply.send(());
            }
            CarouselCommand::ToggleCenterMute { reply } => {
                self.center_muted = !self.center_muted;
                self.publish();
                let _ = reply.send(self.center_muted);
            }
            CarouselCommand::Shutdown => {}
        }
    }

    fn advance(
        &mut self,
        direction: Direction,
        trigger: &'static str,
    ) -> AdvanceOutcome {
        let outcome = self.state.advance(direction);
        match outcome {
            AdvanceOutcome::Moved { from, to } => {
                let now = Instant::now();
                self.settle_at = Some(now + self.config.settle_duration);
                self.rearm_auto_advance(now);
                debug!(
                    carousel = %self.key,
                    from,
                    to,
                    trigger,
                    "carousel advanced"
                );
                self.publish();
            }
            AdvanceOutcome::Debounced => {
                trace!(
                    carousel = %self.key,
                    trigger,
                    "advance ignored while settling"
                );
            }
            AdvanceOutcome::Unchanged => {}
        }
        outcome
    }

    fn auto_advance(&mut self) {
        self.auto_advance_at = None;
        let outcome = self.advance(Direction::Forward, "auto");
        if outcome == AdvanceOutcome::Debounced {
            // A manual transition is still settling; try again a full
            // interval later instead of leaving the carousel without a timer.
            self.rearm_auto_advance(Instant::now());
            self.publish();
        }
    }

    fn finish_transition(&mut self) {
        self.settle_at = None;
        if self.state.finish_transition() {
            self.publish();
        }
    }

    fn on_popup_change(&mut self, selection: Option<PopupSelection>) {
        let Some(selection) = selection else {
            // Coordinator dropped: nothing can hold the carousel any more.
            self.popup_detached = true;
            if self.suspended {
                self.suspended = false;
                self.rearm_auto_advance(Instant::now());
                self.publish();
            }
            return;
        };

        if selection.revision() == self.popup_revision {
            return;
        }
        self.popup_revision = selection.revision();

        let open = selection.is_open();
        if open {
            if self.suspended {
                // replaced while already held
                return;
            }
            self.suspended = true;
            self.auto_advance_at = None;
            info!(carousel = %self.key, "auto-advance suspended behind popup");
        } else {
            // Also reached when a select and its clear both landed before
            // this task ran: the popup was open in between, so the pending
            // deadline is stale either way.
            self.suspended = false;
            self.rearm_auto_advance(Instant::now());
            info!(carousel = %self.key, "auto-advance resumed");
        }
        self.publish();
    }

    /// Replace the auto-advance deadline with a fresh interval from `now`, or
    /// clear it when auto-advance is not allowed to run.
    fn rearm_auto_advance(&mut self, now: Instant) {
        let eligible = self.state.auto_advance_enabled()
            && !self.suspended
            && self.state.len() > 1;
        self.auto_advance_at =
            eligible.then(|| now + self.config.auto_advance_interval);
    }

    fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            key: self.key.clone(),
            len: self.state.len(),
            active_index: self.state.active_index(),
            is_transitioning: self.state.is_transitioning(),
            auto_advance_enabled: self.state.auto_advance_enabled(),
            auto_advance_pending: self.auto_advance_at.is_some(),
            suspended: self.suspended,
            center_muted: self.center_muted,
            revision: self.revision,
        }
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = self.snapshot();
        if let Some(tx) = &self.snapshot_tx {
            tx.send_replace(snapshot);
        }
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
