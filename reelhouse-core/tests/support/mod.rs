//! Shared fixtures for core integration tests.
#![allow(dead_code)]

use std::time::Duration;

use reelhouse_core::media::{AutoplayPolicy, HeadlessElement};
use reelhouse_core::model::{MediaCatalog, MediaItem};

pub const INTERVAL: Duration = Duration::from_millis(2_000);
pub const SETTLE: Duration = Duration::from_millis(500);

/// `len` vertical clips with ids `1..=len`, like the work section reel.
pub fn vertical_catalog(len: u32) -> MediaCatalog {
    let items = (1..=len)
        .map(|id| {
            MediaItem::vertical(id, format!("/vertical-vids/{id}.mp4"))
                .expect("valid fixture item")
                .with_title(format!("Video editing project {id}"))
        })
        .collect();
    MediaCatalog::new(items).expect("non-empty fixture catalog")
}

pub fn element(_: &MediaItem) -> HeadlessElement {
    HeadlessElement::new(AutoplayPolicy::Allow)
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}
