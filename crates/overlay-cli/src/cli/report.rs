//! Console summary printed while a run progresses.

use overlay_core::location::Location;
use overlay_core::overlay::OverlayOutput;
use std::fmt::Write as _;

pub fn banner() -> String {
    format!("location-overlay v{}\n\n", env!("CARGO_PKG_VERSION"))
}

/// Parsed input, one `...Label: value` line per field. Facts are numbered from 0.
pub fn details(location: &Location) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "...Location Name: {}", location.name);
    let _ = writeln!(out, "...Latitude:      {}", location.latitude);
    let _ = writeln!(out, "...Longitude:     {}", location.longitude);
    let _ = writeln!(out, "...Date:          {}", location.display_date());
    for (i, fact) in location.facts.iter().enumerate() {
        let _ = writeln!(out, "...Fact {}:        {}", i, fact);
    }
    out
}

pub fn outputs(out: &OverlayOutput) -> String {
    format!(
        "...Map:           {}\n...Page:          {}\n",
        out.map_path.display(),
        out.html_path.display()
    )
}
