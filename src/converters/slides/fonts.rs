//! Safe font lookup: maps an authored font family onto one of a handful of faces that every
//! slide viewer ships, so text metrics stay close to what the browser measured.

use super::constants::DEFAULT_FONT_FACE;

// (lowercase family, safe face)
const SAFE_FONT_TABLE: &[(&str, &str)] = &[
    ("arial", "Arial"),
    ("helvetica", "Arial"),
    ("helvetica neue", "Arial"),
    ("inter", "Arial"),
    ("roboto", "Arial"),
    ("open sans", "Arial"),
    ("lato", "Arial"),
    ("montserrat", "Arial"),
    ("noto sans", "Arial"),
    ("sans-serif", "Arial"),
    ("system-ui", "Arial"),
    ("-apple-system", "Arial"),
    ("segoe ui", "Segoe UI"),
    ("verdana", "Verdana"),
    ("tahoma", "Tahoma"),
    ("trebuchet ms", "Trebuchet MS"),
    ("calibri", "Calibri"),
    ("times", "Times New Roman"),
    ("times new roman", "Times New Roman"),
    ("georgia", "Georgia"),
    ("merriweather", "Georgia"),
    ("playfair display", "Georgia"),
    ("serif", "Times New Roman"),
    ("courier", "Courier New"),
    ("courier new", "Courier New"),
    ("consolas", "Consolas"),
    ("menlo", "Courier New"),
    ("monaco", "Courier New"),
    ("fira code", "Courier New"),
    ("jetbrains mono", "Courier New"),
    ("monospace", "Courier New"),
];

/// Returns the first family of a CSS `font-family` list, without quotes.
pub fn primary_family(font_family: &str) -> &str {
    font_family
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|family| !family.is_empty())
        .unwrap_or(DEFAULT_FONT_FACE)
}

/// Maps a CSS `font-family` list onto a safe face. Matching is case-insensitive on the first
/// family; unknown families fall back to the default face.
pub fn safe_font_face(font_family: &str) -> &'static str {
    let family = primary_family(font_family).to_ascii_lowercase();
    SAFE_FONT_TABLE
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, face)| *face)
        .unwrap_or(DEFAULT_FONT_FACE)
}
