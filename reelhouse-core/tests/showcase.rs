mod support;

use reelhouse_core::ShowcaseError;
use reelhouse_core::carousel::{CarouselConfig, CarouselKey, Direction};
use reelhouse_core::gallery::{AudioMode, GalleryKey};
use reelhouse_core::geometry::RootMargin;
use reelhouse_core::media::{AutoplayPolicy, HeadlessElement};
use reelhouse_core::model::MediaItemId;
use reelhouse_core::popup::{PopupEvent, PopupPlayer};
use reelhouse_core::showcase::{SelectOutcome, Showcase};
use tokio::time::Instant;

use support::{element, ms, vertical_catalog};

fn showcase_with_work_carousel() -> Showcase {
    let mut showcase = Showcase::new();
    showcase
        .mount_carousel(
            CarouselKey::Work,
            vertical_catalog(5),
            CarouselConfig::work_defaults(),
        )
        .expect("mount work carousel");
    showcase
}

#[tokio::test(start_paused = true)]
async fn only_the_centered_item_can_be_opened() {
    let mut showcase = showcase_with_work_carousel();

    // index 1 holds id 2
    let outcome = showcase
        .request_select(&CarouselKey::Work, MediaItemId(4))
        .unwrap();
    assert_eq!(
        outcome,
        SelectOutcome::NotActive {
            requested: MediaItemId(4),
            active: MediaItemId(2),
        }
    );
    assert!(!showcase.popup().is_open());

    let outcome = showcase
        .request_select(&CarouselKey::Work, MediaItemId(2))
        .unwrap();
    assert!(outcome.is_opened());
    assert_eq!(
        showcase.popup().item().map(|item| item.id()),
        Some(MediaItemId(2))
    );

    assert_eq!(
        showcase
            .request_select(&CarouselKey::Work, MediaItemId(42))
            .unwrap(),
        SelectOutcome::UnknownItem(MediaItemId(42))
    );
}

#[tokio::test(start_paused = true)]
async fn popup_holds_every_mounted_carousel() {
    let mut showcase = showcase_with_work_carousel();
    showcase
        .mount_carousel(
            CarouselKey::Custom("reels".into()),
            vertical_catalog(3),
            CarouselConfig::gallery_defaults(),
        )
        .unwrap();
    let mut work = showcase.carousel(&CarouselKey::Work).unwrap().subscribe();
    let mut reels = showcase
        .carousel(&CarouselKey::Custom("reels".into()))
        .unwrap()
        .subscribe();
    let start = Instant::now();

    showcase
        .request_select(&CarouselKey::Work, MediaItemId(2))
        .unwrap();
    work.wait_for(|s| s.suspended).await.unwrap();
    reels.wait_for(|s| s.suspended).await.unwrap();

    tokio::time::sleep(ms(20_000)).await;
    assert_eq!(work.borrow().active_index, 1);
    assert_eq!(reels.borrow().active_index, 0);

    showcase.request_close_popup();
    work.wait_for(|s| s.active_index == 2).await.unwrap();
    assert_eq!(start.elapsed(), ms(22_000));
    reels.wait_for(|s| s.active_index == 1).await.unwrap();
    assert_eq!(start.elapsed(), ms(25_000));
}

#[tokio::test(start_paused = true)]
async fn selections_emit_one_event_per_call() {
    let mut showcase = showcase_with_work_carousel();
    let cgi = showcase.mount_gallery(
        GalleryKey::Cgi,
        vertical_catalog(3),
        AudioMode::Hover,
        RootMargin::default(),
        element,
    );
    let mut events = showcase.popup_events();

    showcase
        .request_select(&CarouselKey::Work, MediaItemId(2))
        .unwrap();
    showcase
        .request_select_from_gallery(cgi.key(), MediaItemId(3))
        .unwrap();
    showcase.request_close_popup();
    assert!(showcase.request_close_popup().is_none());

    assert!(matches!(events.try_recv(), Ok(PopupEvent::Opened { .. })));
    match events.try_recv() {
        Ok(PopupEvent::Replaced { previous, current }) => {
            assert_eq!(previous.item.id(), MediaItemId(2));
            assert_eq!(current.item.id(), MediaItemId(3));
        }
        other => panic!("expected replacement, got {other:?}"),
    }
    assert!(matches!(events.try_recv(), Ok(PopupEvent::Closed { .. })));
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn advancing_brings_an_item_to_the_center_for_selection() {
    let mut showcase = showcase_with_work_carousel();
    let key = CarouselKey::Work;

    showcase.request_advance(&key, Direction::Backward).await.unwrap();
    let outcome = showcase.request_select(&key, MediaItemId(1)).unwrap();
    assert!(outcome.is_opened());
}

#[tokio::test(start_paused = true)]
async fn popup_player_keeps_its_own_mute_state() {
    let mut showcase = showcase_with_work_carousel();
    let engine = showcase.carousel(&CarouselKey::Work).unwrap();
    assert!(engine.snapshot().center_muted);

    let session = match showcase
        .request_select(&CarouselKey::Work, MediaItemId(2))
        .unwrap()
    {
        SelectOutcome::Opened(session) => session,
        other => panic!("expected popup, got {other:?}"),
    };
    let mut player =
        PopupPlayer::open(session, HeadlessElement::new(AutoplayPolicy::Allow));
    assert!(!player.is_muted());
    assert!(player.media().is_playing());

    // muting the popup leaves the inline card alone
    assert!(player.toggle_muted());
    let engine = showcase.carousel(&CarouselKey::Work).unwrap();
    assert!(engine.snapshot().center_muted);

    // and unmuting the inline center leaves the popup alone
    assert!(!engine.toggle_center_mute().await.unwrap());
    assert!(player.is_muted());

    let element = player.close();
    assert!(!element.is_playing());
    assert_eq!(element.source(), Some("/vertical-vids/2.mp4"));
}

#[tokio::test]
async fn unknown_keys_are_errors() {
    let mut showcase = Showcase::new();
    let key = CarouselKey::Custom("missing".into());

    assert_eq!(
        showcase.request_advance(&key, Direction::Forward).await,
        Err(ShowcaseError::UnknownCarousel(key.clone()))
    );
    assert_eq!(
        showcase.request_select(&key, MediaItemId(1)),
        Err(ShowcaseError::UnknownCarousel(key))
    );
    assert_eq!(
        showcase
            .request_select_from_gallery(&GalleryKey::Featured, MediaItemId(1)),
        Err(ShowcaseError::UnknownGallery(GalleryKey::Featured))
    );
}

#[tokio::test(start_paused = true)]
async fn unmounting_stops_the_carousel() {
    let mut showcase = showcase_with_work_carousel();
    let mut rx = showcase.carousel(&CarouselKey::Work).unwrap().subscribe();

    assert!(showcase.unmount_carousel(&CarouselKey::Work).await);
    assert!(!showcase.unmount_carousel(&CarouselKey::Work).await);
    assert!(rx.changed().await.is_err());
    assert!(showcase.carousel(&CarouselKey::Work).is_none());
}
