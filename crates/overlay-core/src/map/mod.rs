//! Map image generation: tile mosaic, marker overlay, PNG output.

mod marker;

pub use marker::{draw_marker, MarkerStyle};

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::Path;

use crate::config::MapConfig;
use crate::tiles::{TileSource, Viewport, TILE_SIZE};

/// Composes the basemap for `viewport` and draws the marker at its center.
///
/// Tiles that decode to a size other than 256×256 (e.g. high-DPI servers) are
/// resampled with Lanczos. Fails on the first tile that cannot be fetched or decoded.
pub fn render_map(
    viewport: &Viewport,
    source: &dyn TileSource,
    background: [u8; 3],
    marker: &MarkerStyle,
) -> Result<RgbaImage> {
    let (width, height) = viewport.size();
    let [r, g, b] = background;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    for placed in viewport.tiles() {
        let bytes = source
            .fetch(&placed.id)
            .with_context(|| format!("fetch tile {}", placed.id))?;
        let mut tile = image::load_from_memory(&bytes)
            .with_context(|| format!("decode tile {}", placed.id))?
            .to_rgba8();
        if tile.dimensions() != (TILE_SIZE, TILE_SIZE) {
            tile = imageops::resize(&tile, TILE_SIZE, TILE_SIZE, FilterType::Lanczos3);
        }
        imageops::overlay(&mut canvas, &tile, placed.offset_x, placed.offset_y);
    }

    let (mx, my) = viewport.marker_position();
    draw_marker(&mut canvas, mx, my, marker);
    Ok(canvas)
}

/// Writes `image` as PNG, creating the parent directory if needed. Overwrites.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("write {}", path.display()))
}

/// Renders the map for a coordinate and writes it to `path`.
pub fn generate_map(
    lat: f64,
    lon: f64,
    path: &Path,
    cfg: &MapConfig,
    source: &dyn TileSource,
) -> Result<Viewport> {
    let viewport = Viewport::new(lat, lon, cfg.zoom, cfg.width, cfg.height);
    let extent = viewport.extent();
    tracing::debug!(
        zoom = cfg.zoom,
        tiles = viewport.tiles().len(),
        lon_min = extent.lon_min,
        lat_min = extent.lat_min,
        lon_max = extent.lon_max,
        lat_max = extent.lat_max,
        "rendering map"
    );
    let marker = MarkerStyle::new(cfg.marker_radius, cfg.marker_color);
    let image = render_map(&viewport, source, cfg.background, &marker)?;
    write_png(&image, path)?;
    tracing::info!("map written: {}", path.display());
    Ok(viewport)
}
