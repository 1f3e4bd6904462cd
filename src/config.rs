//! User configuration: data location, rendering defaults, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/flex-gallery/config.toml` (default
//! `~/.config/flex-gallery/config.toml`).  Unknown keys and unparsable values
//! are ignored; anything missing keeps its built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::normalize::LayoutDefaults;
use crate::core::video::MediaUrls;

/// Default gallery data file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/images.json";
/// Default id of the host-page element the gallery mounts into.
pub const DEFAULT_CONTAINER_ID: &str = "gallery-container";
/// Grace period before hidden tiles are revealed.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 100;

// ───────────────────────────────────────── config ────────────

/// Everything the renderer and the editor read from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub data_path: PathBuf,
    pub container_id: String,
    pub reveal_delay_ms: u64,
    pub media: MediaUrls,
    pub layout: LayoutDefaults,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            container_id: DEFAULT_CONTAINER_ID.into(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            media: MediaUrls::default(),
            layout: LayoutDefaults::default(),
        }
    }
}

impl GalleryConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk, returning where it was written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    pub fn parse(s: &str) -> Self {
        let mut cfg = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            if value.is_empty() {
                continue;
            }

            match key {
                "data_path" => cfg.data_path = PathBuf::from(value),
                "container_id" => cfg.container_id = value.into(),
                "reveal_delay_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        cfg.reveal_delay_ms = v.min(2000);
                    }
                }
                "video_watch_base" => cfg.media.watch_base = value.into(),
                "video_thumbnail_base" => cfg.media.thumbnail_base = value.into(),
                "video_thumbnail_variant" => cfg.media.thumbnail_variant = value.into(),
                "group_width" => cfg.layout.group_width = value.into(),
                "item_width" => cfg.layout.item_width = value.into(),
                "unplaced_item_width" => cfg.layout.unplaced_item_width = value.into(),
                other => tracing::debug!("ignoring unknown config key {other:?}"),
            }
        }

        cfg
    }

    fn serialise(&self) -> String {
        let lines = [
            "# flex-gallery configuration".to_string(),
            String::new(),
            format!("data_path = \"{}\"", self.data_path.display()),
            format!("container_id = \"{}\"", self.container_id),
            format!("reveal_delay_ms = {}", self.reveal_delay_ms),
            String::new(),
            "# Video links".to_string(),
            format!("video_watch_base = \"{}\"", self.media.watch_base),
            format!("video_thumbnail_base = \"{}\"", self.media.thumbnail_base),
            format!("video_thumbnail_variant = \"{}\"", self.media.thumbnail_variant),
            String::new(),
            "# Width tokens used when the gallery file leaves them out".to_string(),
            format!("group_width = \"{}\"", self.layout.group_width),
            format!("item_width = \"{}\"", self.layout.item_width),
            format!("unplaced_item_width = \"{}\"", self.layout.unplaced_item_width),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/flex-gallery/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("flex-gallery").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(GalleryConfig::parse(""), GalleryConfig::default());
    }

    #[test]
    fn parses_known_keys_and_skips_junk() {
        let cfg = GalleryConfig::parse(
            "# comment\n[section]\ndata_path = \"site/gallery.json\"\nreveal_delay_ms = 99999\n\
             group_width = md:w-1/3\nbogus = 1\nno equals sign\nitem_width =\n",
        );
        assert_eq!(cfg.data_path, PathBuf::from("site/gallery.json"));
        assert_eq!(cfg.reveal_delay_ms, 2000);
        assert_eq!(cfg.layout.group_width, "md:w-1/3");
        assert_eq!(cfg.layout.item_width, "w-full");
    }

    #[test]
    fn serialised_form_parses_back() {
        let mut cfg = GalleryConfig::default();
        cfg.container_id = "photos".into();
        cfg.media.thumbnail_variant = "hqdefault".into();
        cfg.reveal_delay_ms = 250;
        assert_eq!(GalleryConfig::parse(&cfg.serialise()), cfg);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flex-gallery").join("config.toml");
        let mut cfg = GalleryConfig::default();
        cfg.data_path = PathBuf::from("public/gallery.json");
        cfg.save_to(&path).unwrap();
        assert_eq!(GalleryConfig::load_from(&path), cfg);
        assert_eq!(
            GalleryConfig::load_from(&dir.path().join("missing.toml")),
            GalleryConfig::default()
        );
    }
}
