use anyhow::{Context, anyhow, bail};
use reelhouse_core::carousel::{CarouselConfig, CarouselKey, TransformStyle};
use reelhouse_core::gallery::{AudioMode, GalleryKey};
use reelhouse_core::geometry::RootMargin;
use reelhouse_model::{MediaCatalog, MediaItem, ModelResult};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Path to a TOML or JSON showcase configuration file.
pub const CONFIG_PATH_ENV: &str = "SHOWCASE_CONFIG_PATH";
/// Inline JSON showcase configuration.
pub const CONFIG_JSON_ENV: &str = "SHOWCASE_CONFIG_JSON";

/// Directories searched for `showcase.toml` / `showcase.json` when neither
/// environment override is set.
const SEARCH_DIRS: [&str; 2] = [".", "config"];

/// Source that produced the showcase configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShowcaseConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl ShowcaseConfigSource {
    /// Highest-precedence source available right now: the path override,
    /// then inline JSON, then a `showcase.*` file in [`SEARCH_DIRS`].
    /// Blank overrides count as unset.
    pub fn detect() -> Self {
        if let Some(path) = env_override(CONFIG_PATH_ENV) {
            return Self::EnvPath(PathBuf::from(path));
        }
        if env_override(CONFIG_JSON_ENV).is_some() {
            return Self::EnvInline;
        }
        SEARCH_DIRS
            .iter()
            .flat_map(|dir| {
                ["toml", "json"]
                    .map(|ext| Path::new(dir).join(format!("showcase.{ext}")))
            })
            .find(|path| path.is_file())
            .map_or(Self::Default, Self::File)
    }
}

impl fmt::Display for ShowcaseConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("built-in defaults"),
            Self::EnvPath(path) => {
                write!(f, "${CONFIG_PATH_ENV} ({})", path.display())
            }
            Self::EnvInline => write!(f, "${CONFIG_JSON_ENV}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Document syntax of a showcase config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    /// Unrecognised extension: TOML first, then JSON.
    Either,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("toml" | "tml") => Self::Toml,
            _ => Self::Either,
        }
    }
}

fn env_override(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Page-level showcase settings. Every section is optional; a missing
/// section falls back to the built-in work page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Timing and presentation shared by every carousel unless an entry
    /// overrides it.
    pub carousel: CarouselSettings,
    pub lazy_load: LazyLoadSettings,
    pub carousels: Vec<CarouselEntry>,
    pub galleries: Vec<GalleryEntry>,
}

/// Shared carousel tuning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Delay (ms) between automatic advances. Every index change restarts
    /// the countdown, and an open popup holds it entirely.
    pub auto_advance_ms: u64,
    /// Transition length (ms). Advances inside this window are ignored, so
    /// keep it at or below the CSS animation length.
    pub settle_ms: u64,
    pub start_index: usize,
    pub auto_advance: bool,
    /// Start with the centered item muted. Browsers usually refuse unmuted
    /// autoplay, so turning this off mostly produces blocked playback.
    pub center_muted: bool,
    pub style: TransformStyle,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        CarouselSettings::from(CarouselConfig::work_defaults())
    }
}

impl From<CarouselConfig> for CarouselSettings {
    fn from(config: CarouselConfig) -> Self {
        Self {
            auto_advance_ms: config.auto_advance_interval.as_millis() as u64,
            settle_ms: config.settle_duration.as_millis() as u64,
            start_index: config.start_index,
            auto_advance: config.auto_advance,
            center_muted: config.center_muted,
            style: config.style,
        }
    }
}

impl CarouselSettings {
    pub fn to_config(&self) -> CarouselConfig {
        CarouselConfig {
            auto_advance_interval: Duration::from_millis(self.auto_advance_ms),
            settle_duration: Duration::from_millis(self.settle_ms),
            start_index: self.start_index,
            auto_advance: self.auto_advance,
            center_muted: self.center_muted,
            style: self.style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LazyLoadSettings {
    /// How far (px) outside the viewport an element starts loading its
    /// source. Larger values trade bandwidth for fewer visible spinners.
    pub root_margin_px: f32,
}

impl Default for LazyLoadSettings {
    fn default() -> Self {
        Self {
            root_margin_px: RootMargin::default().0,
        }
    }
}

impl LazyLoadSettings {
    pub fn root_margin(&self) -> RootMargin {
        RootMargin::px(self.root_margin_px)
    }
}

/// One carousel on the page. Unset fields inherit [`CarouselSettings`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CarouselEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
    pub items: Vec<MediaItem>,
}

impl CarouselEntry {
    pub fn carousel_key(&self) -> CarouselKey {
        CarouselKey::from(self.key.as_str())
    }

    /// Effective configuration after applying this entry's overrides.
    pub fn carousel_config(
        &self,
        defaults: &CarouselSettings,
    ) -> CarouselConfig {
        let mut config = defaults.to_config();
        if let Some(ms) = self.auto_advance_ms {
            config.auto_advance_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.settle_ms {
            config.settle_duration = Duration::from_millis(ms);
        }
        if let Some(index) = self.start_index {
            config.start_index = index;
        }
        if let Some(enabled) = self.auto_advance {
            config.auto_advance = enabled;
        }
        config
    }

    pub fn catalog(&self) -> anyhow::Result<MediaCatalog> {
        MediaCatalog::new(self.items.clone())
            .with_context(|| {
                format!("invalid items for carousel '{}'", self.key)
            })
    }
}

/// One gallery grid on the page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GalleryEntry {
    pub key: String,
    #[serde(default)]
    pub audio: AudioMode,
    pub items: Vec<MediaItem>,
}

impl GalleryEntry {
    pub fn gallery_key(&self) -> GalleryKey {
        GalleryKey::from(self.key.as_str())
    }

    pub fn catalog(&self) -> anyhow::Result<MediaCatalog> {
        MediaCatalog::new(self.items.clone())
            .with_context(|| {
                format!("invalid items for gallery '{}'", self.key)
            })
    }
}

const FEATURED_TITLE: &str = "Top SaaS Marketing Video Example | HeyMyra";

fn vertical_clip(id: u32) -> ModelResult<MediaItem> {
    MediaItem::vertical(id, format!("/vertical-vids/{id}.mp4"))
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselSettings::default(),
            lazy_load: LazyLoadSettings::default(),
            carousels: vec![CarouselEntry {
                key: CarouselKey::Work.to_string(),
                auto_advance_ms: None,
                settle_ms: None,
                start_index: None,
                auto_advance: None,
                items: (1u32..=5)
                    .flat_map(|id| {
                        let title = format!("Video editing project {id}");
                        vertical_clip(id).map(|item| item.with_title(title))
                    })
                    .collect(),
            }],
            galleries: vec![
                GalleryEntry {
                    key: GalleryKey::Featured.to_string(),
                    audio: AudioMode::Toggle,
                    items: [(1u32, Some(FEATURED_TITLE)), (2, None)]
                        .into_iter()
                        .flat_map(|(id, title)| {
                            let src = format!("/horizontal-vids/{id}.mp4");
                            MediaItem::horizontal(id, src).map(|item| {
                                match title {
                                    Some(title) => item.with_title(title),
                                    None => item,
                                }
                            })
                        })
                        .collect(),
                },
                GalleryEntry {
                    key: GalleryKey::Cgi.to_string(),
                    audio: AudioMode::Hover,
                    items: [
                        (1u32, "Basic"),
                        (3, "Advance"),
                        (2, "Intermediate"),
                    ]
                    .into_iter()
                    .flat_map(|(id, label)| {
                        vertical_clip(id).map(|item| item.with_title(label))
                    })
                    .collect(),
                },
            ],
        }
    }
}

impl ShowcaseConfig {
    /// Load and validate the config named by [`ShowcaseConfigSource::detect`].
    pub fn load_from_env() -> anyhow::Result<(Self, ShowcaseConfigSource)> {
        let source = ShowcaseConfigSource::detect();
        let config = Self::load(&source)?;
        Ok((config, source))
    }

    /// Load and validate a single file, picking the syntax from its
    /// extension.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        Self::load(&ShowcaseConfigSource::File(path.to_path_buf()))
    }

    /// Read `source`, parse it and reject anything the runtime could not
    /// mount. Nothing is returned unvalidated.
    pub fn load(source: &ShowcaseConfigSource) -> anyhow::Result<Self> {
        let config = match source {
            ShowcaseConfigSource::Default => Self::default(),
            ShowcaseConfigSource::EnvPath(path)
            | ShowcaseConfigSource::File(path) => {
                let contents = fs::read_to_string(path).with_context(|| {
                    format!("failed to read showcase config {}", path.display())
                })?;
                Self::parse(&contents, ConfigFormat::from_path(path))
                    .with_context(|| {
                        format!("failed to parse {}", path.display())
                    })?
            }
            ShowcaseConfigSource::EnvInline => {
                let raw = env_override(CONFIG_JSON_ENV)
                    .with_context(|| format!("{CONFIG_JSON_ENV} is not set"))?;
                Self::parse(&raw, ConfigFormat::Json)
                    .with_context(|| {
                        format!("failed to parse {CONFIG_JSON_ENV}")
                    })?
            }
        };
        config
            .validate()
            .with_context(|| format!("invalid showcase config {source}"))?;
        Ok(config)
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(contents).context("toml error")
            }
            ConfigFormat::Json => {
                serde_json::from_str(contents).context("json error")
            }
            ConfigFormat::Either => {
                toml::from_str(contents).or_else(|toml_err| {
                    serde_json::from_str(contents).map_err(|json_err| {
                        anyhow!(
                            "toml error: {toml_err}; json error: {json_err}"
                        )
                    })
                })
            }
        }
    }

    /// Check everything the runtime would otherwise reject at mount time:
    /// catalogs, timings, start indices and duplicate keys.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.lazy_load.root_margin_px.is_finite()
            || self.lazy_load.root_margin_px < 0.0
        {
            bail!(
                "lazy_load.root_margin_px must be non-negative, got {}",
                self.lazy_load.root_margin_px
            );
        }

        let mut carousel_keys = HashSet::new();
        for entry in &self.carousels {
            if !carousel_keys.insert(entry.carousel_key()) {
                bail!("duplicate carousel key '{}'", entry.key);
            }
            let catalog = entry.catalog()?;
            let config = entry.carousel_config(&self.carousel);
            config
                .validate()
                .with_context(|| format!("carousel '{}'", entry.key))?;
            if catalog.len() > 1 && config.start_index >= catalog.len() {
                bail!(
                    "carousel '{}': start_index {} out of range for {} items",
                    entry.key,
                    config.start_index,
                    catalog.len()
                );
            }
        }

        let mut gallery_keys = HashSet::new();
        for entry in &self.galleries {
            if !gallery_keys.insert(entry.gallery_key()) {
                bail!("duplicate gallery key '{}'", entry.key);
            }
            entry.catalog()?;
        }
        Ok(())
    }

    pub fn carousel(&self, key: &CarouselKey) -> Option<&CarouselEntry> {
        self.carousels
            .iter()
            .find(|entry| &entry.carousel_key() == key)
    }

    pub fn gallery(&self, key: &GalleryKey) -> Option<&GalleryEntry> {
        self.galleries
            .iter()
            .find(|entry| &entry.gallery_key() == key)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_work_page() {
        let config = ShowcaseConfig::default();
        config.validate().unwrap();

        let work = config.carousel(&CarouselKey::Work).unwrap();
        assert_eq!(work.items.len(), 5);
        let effective = work.carousel_config(&config.carousel);
        assert_eq!(effective, CarouselConfig::work_defaults());

        let cgi = config.gallery(&GalleryKey::Cgi).unwrap();
        assert_eq!(cgi.audio, AudioMode::Hover);
        let labels: Vec<_> =
            cgi.items.iter().filter_map(|item| item.title()).collect();
        assert_eq!(labels, vec!["Basic", "Advance", "Intermediate"]);

        let featured = config.gallery(&GalleryKey::Featured).unwrap();
        assert_eq!(featured.items.len(), 2);
        assert_eq!(config.lazy_load.root_margin(), RootMargin::default());
    }

    #[test]
    fn entry_overrides_only_what_it_sets() {
        let entry = CarouselEntry {
            key: "reels".into(),
            auto_advance_ms: Some(5_000),
            settle_ms: None,
            start_index: Some(0),
            auto_advance: None,
            items: Vec::new(),
        };
        let config = entry.carousel_config(&CarouselSettings::default());
        assert_eq!(config.auto_advance_interval, Duration::from_millis(5_000));
        assert_eq!(config.settle_duration, Duration::from_millis(500));
        assert_eq!(config.start_index, 0);
        assert!(config.auto_advance);
        assert_eq!(entry.carousel_key(), CarouselKey::Custom("reels".into()));
    }

    #[test]
    fn settings_round_trip_through_carousel_config() {
        let settings =
            CarouselSettings::from(CarouselConfig::gallery_defaults());
        assert_eq!(settings.auto_advance_ms, 5_000);
        assert_eq!(settings.to_config(), CarouselConfig::gallery_defaults());
    }

    #[test]
    fn empty_carousel_is_rejected() {
        let mut config = ShowcaseConfig::default();
        config.carousels[0].items.clear();
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("carousel 'work'"));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut config = ShowcaseConfig::default();
        let copy = config.galleries[1].clone();
        config.galleries.push(copy);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate gallery key 'cgi'"));
    }

    #[test]
    fn start_index_must_fit_the_catalog() {
        let mut config = ShowcaseConfig::default();
        config.carousels[0].start_index = Some(5);
        assert!(config.validate().is_err());

        config.carousels[0].start_index = Some(4);
        config.validate().unwrap();
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = ShowcaseConfig::default();
        config.carousel.auto_advance_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn format_follows_the_extension() {
        let format = |name: &str| ConfigFormat::from_path(Path::new(name));
        assert_eq!(format("showcase.json"), ConfigFormat::Json);
        assert_eq!(format("config/showcase.tml"), ConfigFormat::Toml);
        assert_eq!(format("showcase.conf"), ConfigFormat::Either);
        assert_eq!(format("showcase"), ConfigFormat::Either);
    }

    #[test]
    fn sources_name_where_they_came_from() {
        let path = ShowcaseConfigSource::EnvPath("/etc/showcase.toml".into());
        assert_eq!(
            path.to_string(),
            "$SHOWCASE_CONFIG_PATH (/etc/showcase.toml)"
        );
        assert_eq!(
            ShowcaseConfigSource::EnvInline.to_string(),
            "$SHOWCASE_CONFIG_JSON"
        );
        let loaded = ShowcaseConfig::load(&ShowcaseConfigSource::Default);
        assert_eq!(loaded.unwrap(), ShowcaseConfig::default());
    }

    #[test]
    fn negative_margin_is_rejected() {
        let mut config = ShowcaseConfig::default();
        config.lazy_load.root_margin_px = -1.0;
        assert!(config.validate().is_err());
    }
}
