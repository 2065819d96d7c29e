use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::APP_NAME;
use crate::tiles;

/// Highest zoom level served by standard OSM-style tile servers.
pub const MAX_ZOOM: u8 = 19;

/// Largest accepted output image edge in pixels.
pub const MAX_IMAGE_EDGE: u32 = 4096;

/// Basemap rendering parameters (`[map]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Slippy-map zoom level.
    pub zoom: u8,
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Marker circle radius in pixels.
    pub marker_radius: f32,
    /// Marker fill color as RGB.
    pub marker_color: [u8; 3],
    /// Fill for areas no tile covers (beyond the Mercator limit).
    pub background: [u8; 3],
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 11,
            width: 512,
            height: 512,
            marker_radius: 9.0,
            marker_color: [255, 0, 0],
            background: [224, 224, 224],
        }
    }
}

/// Tile server access (`[tiles]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// User-Agent sent with each tile request (OSM tile policy requires one).
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            user_agent: format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/location-overlay/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Directory (relative to the output root) receiving map PNGs.
    pub maps_dir: String,
    /// Directory (relative to the output root) receiving HTML pages.
    pub html_dir: String,
    /// Stylesheet href written into every page.
    pub stylesheet_href: String,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub tiles: TileConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            maps_dir: "maps".to_string(),
            html_dir: "html".to_string(),
            stylesheet_href: "../css_etc/obscura.css".to_string(),
            map: MapConfig::default(),
            tiles: TileConfig::default(),
        }
    }
}

impl OverlayConfig {
    /// Checks ranges and the tile URL template. Called after loading and after CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if self.map.zoom > MAX_ZOOM {
            anyhow::bail!("zoom {} exceeds maximum {}", self.map.zoom, MAX_ZOOM);
        }
        for (label, edge) in [("width", self.map.width), ("height", self.map.height)] {
            if edge == 0 || edge > MAX_IMAGE_EDGE {
                anyhow::bail!("map {} must be in 1..={}, got {}", label, MAX_IMAGE_EDGE, edge);
            }
        }
        if !(self.map.marker_radius.is_finite() && self.map.marker_radius > 0.0) {
            anyhow::bail!("marker_radius must be positive, got {}", self.map.marker_radius);
        }
        if self.maps_dir.trim().is_empty() || self.html_dir.trim().is_empty() {
            anyhow::bail!("maps_dir and html_dir must not be empty");
        }
        tiles::validate_template(&self.tiles.url_template)?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OverlayConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OverlayConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing file is an error.
pub fn load_from_path(path: &Path) -> Result<OverlayConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: OverlayConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
