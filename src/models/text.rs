use serde::{Deserialize, Serialize};

/// Underline decoration of a run. `color` is set when the underline comes from a
/// `border-bottom` rather than from `text-decoration`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Underline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The styling carried by one text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStyle {
    /// Text colour as `RRGGBB`.
    pub color: String,
    /// Font size in points.
    pub font_size_pt: f64,
    pub bold: bool,
    pub italic: bool,
    /// The (safe) font face.
    pub font_face: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    /// Character spacing in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing_pt: Option<f64>,
    /// Transparency percentage, 0..=100. Omitted for opaque text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u8>,
}

/// One styled run of text. Runs render concatenated in the order they are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    /// Absent for explicit line breaks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<RunStyle>,
    /// True for the zero-text run produced by an explicit line break.
    pub break_line: bool,
}

impl TextRun {
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        TextRun {
            text: text.into(),
            style: Some(style),
            break_line: false,
        }
    }

    /// The marker run for an explicit line break.
    pub fn line_break() -> Self {
        TextRun {
            text: String::new(),
            style: None,
            break_line: true,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment inside a text frame or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}
