//! The full run for one location: sanitize name, render map, write page.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::OverlayConfig;
use crate::html::{self, Page};
use crate::location::Location;
use crate::map;
use crate::naming::{OutputLayout, OutputPaths};
use crate::tiles::TileSource;

/// Files produced by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayOutput {
    pub stem: String,
    pub map_path: PathBuf,
    pub html_path: PathBuf,
}

/// Renders the map image and the HTML page for `location` under `layout`.
///
/// The map is written first; if it fails, no page is written.
pub fn run(
    location: &Location,
    cfg: &OverlayConfig,
    layout: &OutputLayout,
    source: &dyn TileSource,
) -> Result<OverlayOutput> {
    let paths = OutputPaths::for_name(&location.name, layout);
    tracing::info!(
        name = %location.name,
        stem = %paths.stem,
        lat = location.latitude,
        lon = location.longitude,
        facts = location.facts.len(),
        "creating overlay"
    );

    map::generate_map(
        location.latitude,
        location.longitude,
        &paths.map_path,
        &cfg.map,
        source,
    )?;

    let display_date = location.display_date();
    let page = Page {
        location_name: &location.name,
        display_date: &display_date,
        facts: &location.facts,
        map_href: &paths.map_href,
        stylesheet_href: &cfg.stylesheet_href,
    };
    html::write_page(&paths.html_path, &page)?;

    Ok(OverlayOutput {
        stem: paths.stem,
        map_path: paths.map_path,
        html_path: paths.html_path,
    })
}
