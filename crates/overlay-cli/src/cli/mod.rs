//! CLI for location-overlay.

mod report;

use anyhow::Result;
use clap::Parser;
use overlay_core::config::{self, OverlayConfig};
use overlay_core::location::{Location, MAX_FACTS};
use overlay_core::naming::OutputLayout;
use overlay_core::overlay;
use overlay_core::tiles::HttpTileSource;
use std::path::PathBuf;

/// Render a map of a location and a static HTML overlay page for it.
///
/// Writes `maps/<name>.png` and `html/<name>.html` under the output directory,
/// where `<name>` is the location name stripped of accents and with spaces
/// replaced by underscores.
///
/// Options go before the positional arguments: the name, date and facts
/// accept values starting with `-`, so anything after the name is read as
/// positional text.
#[derive(Debug, Parser)]
#[command(name = "location-overlay", version)]
#[command(about = "Render a location map and its HTML overlay page", long_about = None)]
pub struct Cli {
    /// Location name, shown on the page as given.
    #[arg(allow_hyphen_values = true)]
    pub name: String,

    /// Latitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Date; numeric dates are read day-first (01/02/2020 is 1 February 2020).
    #[arg(allow_hyphen_values = true)]
    pub date: String,

    /// Up to four short facts shown on the page, in order.
    #[arg(num_args = 0..=MAX_FACTS, value_name = "FACT", allow_hyphen_values = true)]
    pub facts: Vec<String>,

    /// Directory receiving the maps/ and html/ folders.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Map zoom level (overrides config).
    #[arg(long, value_name = "Z")]
    pub zoom: Option<u8>,

    /// Square map size in pixels (overrides config).
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Tile URL template with {z}, {x} and {y} (overrides config).
    #[arg(long, value_name = "TEMPLATE")]
    pub tile_url: Option<String>,

    /// Read configuration from this file instead of the XDG config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, cfg: &mut OverlayConfig) {
        if let Some(zoom) = self.zoom {
            cfg.map.zoom = zoom;
        }
        if let Some(size) = self.size {
            cfg.map.width = size;
            cfg.map.height = size;
        }
        if let Some(url) = &self.tile_url {
            cfg.tiles.url_template = url.clone();
        }
    }

    fn load_config(&self) -> Result<OverlayConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        self.apply_overrides(&mut cfg);
        cfg.validate()?;
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        let location = Location::new(
            self.name,
            self.latitude,
            self.longitude,
            &self.date,
            self.facts,
        )?;

        print!("{}", report::banner());
        print!("{}", report::details(&location));

        let layout = OutputLayout::new(&self.out_dir, &cfg);
        let source = HttpTileSource::new(&cfg.tiles)?;
        let out = overlay::run(&location, &cfg, &layout, &source)?;

        print!("{}", report::outputs(&out));
        Ok(())
    }
}
