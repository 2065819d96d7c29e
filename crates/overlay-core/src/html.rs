//! Static HTML page for one location.
//!
//! The document layout is fixed: location and date headings, one heading block
//! per fact, and the map image. Text is inserted as given, without escaping, so
//! markup in a name or fact ends up in the page verbatim.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const PAGE_TITLE: &str = "Location_template";
const MAP_DIV_STYLE: &str = "top: 50px; left: 1420px;";

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub location_name: &'a str,
    pub display_date: &'a str,
    pub facts: &'a [String],
    /// Image src, relative to the page (e.g. `../maps/Sao_Paulo.png`).
    pub map_href: &'a str,
    pub stylesheet_href: &'a str,
}

/// Renders the page. The document has no trailing newline after `</html>`.
pub fn render_page(page: &Page<'_>) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html>\n");
    out.push_str("  <head>\n");
    let _ = writeln!(out, "    <title>{}</title>", PAGE_TITLE);
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str("    <meta charset=\"UTF-8\">\n");
    let _ = writeln!(
        out,
        "    <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">",
        page.stylesheet_href
    );
    out.push_str("  </head>\n");
    out.push_str("  <body>\n");

    out.push_str("    <div class=\"fixed-location\">\n");
    let _ = writeln!(out, "      <h1>{}</h1>", page.location_name);
    out.push_str("    </div>\n");

    out.push_str("    <div class=\"fixed-date\">\n");
    let _ = writeln!(out, "      <h1>{}</h1>", page.display_date);
    out.push_str("    </div>\n");

    for (i, fact) in page.facts.iter().enumerate() {
        let _ = writeln!(
            out,
            "    <div class=\"fixed-fact{}\" align=\"right\">",
            i + 1
        );
        let _ = writeln!(out, "      <h3>{}</h3>", fact);
        out.push_str("    </div>\n");
    }

    let _ = writeln!(out, "    <div id=\"mapid\" style=\"{}\">", MAP_DIV_STYLE);
    let _ = writeln!(out, "      <img src=\"{}\">", page.map_href);
    out.push_str("    </div>\n");

    out.push_str("  </body>\n");
    out.push_str("</html>");
    out
}

/// Renders and writes the page to `path`, creating the parent directory. Overwrites.
pub fn write_page(path: &Path, page: &Page<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, render_page(page)).with_context(|| format!("write {}", path.display()))?;
    tracing::info!("page written: {}", path.display());
    Ok(())
}
