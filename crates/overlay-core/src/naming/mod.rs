//! File stem and output path derivation.
//!
//! Derives a safe file stem from the location name and lays out where the map
//! image and the HTML page are written, plus the relative href the page uses
//! to reach the image.

mod sanitize;

pub use sanitize::{sanitize_name, MAX_STEM_BYTES};

use std::path::PathBuf;

use crate::config::OverlayConfig;

/// Stem used when the location name sanitizes to nothing.
pub const DEFAULT_STEM: &str = "location";

/// Derives the file stem for a location name.
///
/// # Examples
///
/// - `file_stem("São Paulo")` → `"Sao_Paulo"`
/// - `file_stem("東京")` → `"location"`
pub fn file_stem(name: &str) -> String {
    let sanitized = sanitize_name(name);
    if sanitized.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        sanitized
    }
}

/// Where the two output directories live, relative to an output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub maps_dir: String,
    pub html_dir: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, cfg: &OverlayConfig) -> Self {
        Self {
            root: root.into(),
            maps_dir: cfg.maps_dir.trim_matches('/').to_string(),
            html_dir: cfg.html_dir.trim_matches('/').to_string(),
        }
    }
}

/// Resolved output locations for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub stem: String,
    /// `<root>/<maps_dir>/<stem>.png`
    pub map_path: PathBuf,
    /// `<root>/<html_dir>/<stem>.html`
    pub html_path: PathBuf,
    /// `../<maps_dir>/<stem>.png`, as referenced from the HTML directory.
    pub map_href: String,
}

impl OutputPaths {
    pub fn for_stem(stem: &str, layout: &OutputLayout) -> Self {
        let map_file = format!("{stem}.png");
        Self {
            stem: stem.to_string(),
            map_path: layout.root.join(&layout.maps_dir).join(&map_file),
            html_path: layout
                .root
                .join(&layout.html_dir)
                .join(format!("{stem}.html")),
            map_href: format!("../{}/{}", layout.maps_dir, map_file),
        }
    }

    /// Derives the stem from `name` and resolves both paths.
    pub fn for_name(name: &str, layout: &OutputLayout) -> Self {
        Self::for_stem(&file_stem(name), layout)
    }
}
