//! Shared types for the carousel module

use std::fmt;
use std::time::Duration;

use super::transform::TransformStyle;
use crate::error::{Result, ShowcaseError};

/// Unique key for identifying carousels mounted on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CarouselKey {
    /// The vertical video carousel of the work section.
    Work,
    Custom(String),
}

impl fmt::Display for CarouselKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselKey::Work => f.write_str("work"),
            CarouselKey::Custom(name) => f.write_str(name),
        }
    }
}

impl From<&str> for CarouselKey {
    fn from(value: &str) -> Self {
        match value {
            "work" => CarouselKey::Work,
            other => CarouselKey::Custom(other.to_string()),
        }
    }
}

/// Step direction for [`super::CarouselState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub const fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Static configuration for a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Delay between automatic `advance(+1)` calls. Restarted by every index
    /// change.
    pub auto_advance_interval: Duration,
    /// Length of the transition window during which further advances are
    /// ignored. Matches the visual animation length.
    pub settle_duration: Duration,
    /// Index shown first. Ignored for single-item carousels.
    pub start_index: usize,
    pub auto_advance: bool,
    /// Start with the centered item muted.
    pub center_muted: bool,
    pub style: TransformStyle,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::work_defaults()
    }
}

impl CarouselConfig {
    /// Work section carousel: advances every two seconds, starting on the
    /// second clip.
    pub const fn work_defaults() -> Self {
        Self {
            auto_advance_interval: Duration::from_millis(2_000),
            settle_duration: Duration::from_millis(500),
            start_index: 1,
            auto_advance: true,
            center_muted: true,
            style: TransformStyle::DEFAULT,
        }
    }

    /// Slower rotation used for gallery-style carousels.
    pub const fn gallery_defaults() -> Self {
        Self {
            auto_advance_interval: Duration::from_millis(5_000),
            settle_duration: Duration::from_millis(500),
            start_index: 0,
            auto_advance: true,
            center_muted: true,
            style: TransformStyle::DEFAULT,
        }
    }

    pub fn with_auto_advance_interval(mut self, interval: Duration) -> Self {
        self.auto_advance_interval = interval;
        self
    }

    pub fn with_settle_duration(mut self, settle: Duration) -> Self {
        self.settle_duration = settle;
        self
    }

    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    pub fn with_auto_advance(mut self, enabled: bool) -> Self {
        self.auto_advance = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.auto_advance_interval.is_zero() {
            return Err(ShowcaseError::InvalidConfiguration(
                "auto-advance interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
