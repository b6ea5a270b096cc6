//! Drive a configured showcase on a paused clock and log what a viewer would
//! see: carousel rotation, per-card playback and popup sessions.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use reelhouse_config::{ShowcaseConfig, ShowcaseConfigSource, telemetry};
use reelhouse_core::carousel::{CarouselKey, CarouselSnapshot, CarouselView};
use reelhouse_core::gallery::Gallery;
use reelhouse_core::media::{AutoplayPolicy, HeadlessElement};
use reelhouse_core::popup::{PopupEvent, PopupPlayer};
use reelhouse_core::showcase::{SelectOutcome, Showcase};
use reelhouse_model::MediaItem;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "reelhouse-sim",
    about = "Simulate a Reelhouse showcase page on a virtual clock"
)]
struct Cli {
    /// Showcase config (TOML or JSON). Defaults to SHOWCASE_CONFIG_PATH,
    /// SHOWCASE_CONFIG_JSON, ./showcase.toml, then built-in defaults.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Carousel whose cards are simulated and logged.
    #[arg(long, default_value = "work")]
    carousel: String,

    /// Virtual run time in milliseconds.
    #[arg(long, default_value_t = 12_000)]
    duration_ms: u64,

    /// Open the popup on the centered card at this time (ms).
    #[arg(long)]
    select_at_ms: Option<u64>,

    /// Dismiss the popup at this time (ms).
    #[arg(long)]
    close_at_ms: Option<u64>,

    /// Autoplay policy of the simulated browser.
    #[arg(long, value_enum, default_value_t = PolicyArg::MutedOnly)]
    autoplay: PolicyArg,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Allow,
    MutedOnly,
    Deny,
}

impl From<PolicyArg> for AutoplayPolicy {
    fn from(val: PolicyArg) -> Self {
        match val {
            PolicyArg::Allow => AutoplayPolicy::Allow,
            PolicyArg::MutedOnly => AutoplayPolicy::MutedOnly,
            PolicyArg::Deny => AutoplayPolicy::Deny,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log)?;

    let (config, source) = match &cli.config {
        Some(path) => {
            let source = ShowcaseConfigSource::File(path.clone());
            (ShowcaseConfig::load(&source)?, source)
        }
        None => ShowcaseConfig::load_from_env()?,
    };
    info!(%source, "showcase config loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .context("failed to build simulation runtime")?;
    runtime.block_on(simulate(cli, config))
}

async fn simulate(cli: Cli, config: ShowcaseConfig) -> Result<()> {
    let policy = AutoplayPolicy::from(cli.autoplay);
    let make_element = move |_: &MediaItem| HeadlessElement::new(policy);
    let margin = config.lazy_load.root_margin();

    let mut showcase = Showcase::new();
    let mut events = showcase.popup_events();

    for entry in &config.carousels {
        showcase.mount_carousel(
            entry.carousel_key(),
            entry.catalog()?,
            entry.carousel_config(&config.carousel),
        )?;
    }
    let mut galleries: Vec<Gallery<HeadlessElement>> = Vec::new();
    for entry in &config.galleries {
        let mut gallery = showcase.mount_gallery(
            entry.gallery_key(),
            entry.catalog()?,
            entry.audio,
            margin,
            make_element,
        );
        for card in entry.items.iter() {
            gallery.notify_intersection(card.id());
        }
        galleries.push(gallery);
    }

    let key = CarouselKey::from(cli.carousel.as_str());
    let engine = showcase
        .carousel(&key)
        .ok_or_else(|| anyhow!("carousel '{key}' is not configured"))?;
    let mut view = CarouselView::new(engine, margin, make_element);
    for index in 0..view.len() {
        view.notify_intersection(index);
    }
    let initial = view.sync();
    log_carousel(&view, &initial, Duration::ZERO);

    let start = Instant::now();
    let at = |ms: u64| start + Duration::from_millis(ms);
    let end = at(cli.duration_ms);
    let mut select_at = cli.select_at_ms.map(at);
    let mut close_at = cli.close_at_ms.map(at);
    let mut player: Option<PopupPlayer<HeadlessElement>> = None;
    let mut advances = 0usize;
    let mut popup_events = 0usize;

    loop {
        tokio::select! {
            biased;

            _ = sleep_until_some(select_at) => {
                select_at = None;
                let active = showcase
                    .carousel(&key)
                    .and_then(|engine| engine.active_item())
                    .map(|item| item.id());
                if let Some(id) = active {
                    match showcase.request_select(&key, id)? {
                        SelectOutcome::Opened(session) => {
                            info!(
                                at_ms = elapsed_ms(start),
                                session = %session.id,
                                item = %id,
                                "popup requested"
                            );
                        }
                        outcome => warn!(?outcome, "popup request ignored"),
                    }
                }
            }

            _ = sleep_until_some(close_at) => {
                close_at = None;
                if showcase.request_close_popup().is_none() {
                    debug!("close requested with no popup open");
                }
            }

            event = events.recv() => match event {
                Ok(event) => {
                    popup_events += 1;
                    player =
                        on_popup_event(event, player.take(), policy, start);
                    for gallery in &mut galleries {
                        gallery.sync_popup();
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "popup events dropped");
                }
                Err(RecvError::Closed) => break,
            },

            snapshot = view.changed() => match snapshot {
                Some(snapshot) => {
                    if snapshot.is_transitioning {
                        advances += 1;
                    }
                    log_carousel(&view, &snapshot, start.elapsed());
                }
                None => break,
            },

            _ = time::sleep_until(end) => break,
        }
    }

    let final_snapshot = view.sync();
    let play_attempts: usize = (0..view.len())
        .filter_map(|index| view.media(index))
        .map(|media| media.element().play_attempts())
        .sum();
    info!(
        elapsed_ms = elapsed_ms(start),
        advances,
        popup_events,
        active_index = final_snapshot.active_index,
        play_attempts,
        "simulation finished"
    );

    if let Some(player) = player {
        player.close();
    }
    view.dispose();
    for gallery in &mut galleries {
        gallery.dispose();
    }
    showcase.shutdown().await;
    Ok(())
}

fn on_popup_event(
    event: PopupEvent,
    player: Option<PopupPlayer<HeadlessElement>>,
    policy: AutoplayPolicy,
    start: Instant,
) -> Option<PopupPlayer<HeadlessElement>> {
    let at_ms = elapsed_ms(start);
    match event {
        PopupEvent::Opened { current }
        | PopupEvent::Replaced { current, .. } => {
            if let Some(previous) = player {
                previous.close();
            }
            let player =
                PopupPlayer::open(current, HeadlessElement::new(policy));
            info!(
                at_ms,
                item = %player.item().id(),
                playback = ?player.playback(),
                "popup open"
            );
            Some(player)
        }
        PopupEvent::Closed { previous } => {
            if let Some(player) = player {
                player.close();
            }
            info!(at_ms, item = %previous.item.id(), "popup closed");
            None
        }
    }
}

fn log_carousel(
    view: &CarouselView<HeadlessElement>,
    snapshot: &CarouselSnapshot,
    at: Duration,
) {
    info!(
        at_ms = at.as_millis() as u64,
        carousel = %snapshot.key,
        active = snapshot.active_index,
        transitioning = snapshot.is_transitioning,
        suspended = snapshot.suspended,
        "carousel"
    );
    for (index, transform) in view.transforms().iter().enumerate() {
        let playback = view.media(index).map(|media| media.playback());
        debug!(
            index,
            diff = transform.diff,
            x = transform.x_offset,
            scale = transform.scale,
            opacity = transform.opacity,
            z = transform.z_index,
            ?playback,
            "card"
        );
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
