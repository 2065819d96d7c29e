//! Slippy-map tiles: addressing, URL templates, and the source seam.
//!
//! The map renderer only depends on [`TileSource`]; [`HttpTileSource`] is the
//! libcurl-backed implementation used by the CLI.

mod fetch;
mod projection;

pub use fetch::HttpTileSource;
pub use projection::{Extent, PlacedTile, Viewport, MAX_LATITUDE, TILE_SIZE};

use anyhow::{Context, Result};

/// Address of one 256×256 Web Mercator tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Anything that can hand back encoded (PNG/JPEG) bytes for a tile.
pub trait TileSource {
    fn fetch(&self, tile: &TileId) -> Result<Vec<u8>>;
}

/// Substitutes `{z}`, `{x}` and `{y}` in a tile URL template.
pub fn expand_template(template: &str, tile: &TileId) -> String {
    template
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

/// Checks that the template has all placeholders and expands to an http(s) URL.
pub fn validate_template(template: &str) -> Result<()> {
    for placeholder in ["{z}", "{x}", "{y}"] {
        if !template.contains(placeholder) {
            anyhow::bail!("tile URL template {:?} lacks {}", template, placeholder);
        }
    }
    let sample = expand_template(template, &TileId { z: 0, x: 0, y: 0 });
    let parsed = url::Url::parse(&sample)
        .with_context(|| format!("tile URL template {:?} is not a valid URL", template))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("tile URL scheme {:?} is not supported", other),
    }
}
