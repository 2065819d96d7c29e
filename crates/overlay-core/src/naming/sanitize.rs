//! ASCII-only, filesystem-safe name sanitization.

use unicode_normalization::UnicodeNormalization;

/// Longest stem kept, leaving room for `.html` within Linux NAME_MAX (255).
pub const MAX_STEM_BYTES: usize = 250;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '/' | '\\' | '?' | '#' | '%')
}

/// Sanitizes a location name for use as a file stem.
///
/// - Decomposes to NFD and drops every non-ASCII code point, so `São` becomes `Sao`
/// - Treats whitespace, control chars, `/`, `\`, `?`, `#` and `%` as separators; each run
///   becomes one `_`, so a stem never ends the image href early with a query or fragment
/// - Drops separators and dots at the start, and separators at the end
/// - Limits length to [`MAX_STEM_BYTES`]
///
/// The result may be empty (e.g. a name written only in CJK characters).
/// Applying it to its own output returns the same string.
pub fn sanitize_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.nfd() {
        if is_separator(c) {
            pending_sep = true;
            continue;
        }
        if !c.is_ascii() {
            continue;
        }
        if out.is_empty() {
            if c == '.' {
                continue;
            }
        } else if pending_sep {
            out.push('_');
        }
        pending_sep = false;
        out.push(c);
    }

    if out.len() > MAX_STEM_BYTES {
        // ASCII only at this point, so any index is a char boundary.
        out.truncate(MAX_STEM_BYTES);
        let kept = out.trim_end_matches('_').len();
        out.truncate(kept);
    }
    out
}
