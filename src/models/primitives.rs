use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::common::Frame;
use crate::models::text::{TextAlign, TextRun, VerticalAlign};

/// The geometry kind of a shape primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rect,
    /// All four corners rounded by `radius_ratio`.
    RoundRect,
    Ellipse,
    /// Only the two top corners rounded. Rotated 180° it rounds the bottom corners instead.
    TopRoundRect,
    Line,
}

/// Dash pattern of an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashType {
    #[default]
    Solid,
    Dash,
    SysDot,
}

/// A solid fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillProps {
    /// `RRGGBB`.
    pub color: String,
    /// 0..=100 percent.
    pub transparency: u8,
}

/// An outline or a line stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProps {
    /// `RRGGBB`.
    pub color: String,
    /// Stroke width in points.
    pub width_pt: f64,
    pub dash: DashType,
    /// 0..=100 percent.
    pub transparency: u8,
}

/// An outer shadow effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowProps {
    /// `RRGGBB`.
    pub color: String,
    /// 0.0..=1.0.
    pub opacity: f64,
    /// Blur radius in points.
    pub blur_pt: f64,
    /// Offset distance in points.
    pub offset_pt: f64,
    /// Direction of the offset in degrees, clockwise from the positive x axis.
    pub angle_deg: f64,
}

/// A filled and/or outlined shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePrimitive {
    pub kind: ShapeKind,
    pub frame: Frame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowProps>,
    /// Corner rounding relative to half the shorter side, 0.0..=1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_ratio: Option<f64>,
    /// Rotation in degrees.
    pub rotation: f64,
}

/// A frame of styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlockPrimitive {
    pub frame: Frame,
    pub runs: Vec<TextRun>,
    pub align: TextAlign,
    pub valign: VerticalAlign,
    /// Line spacing in points, absent for the font's normal spacing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing_pt: Option<f64>,
    /// Inner margins in points, `[top, right, bottom, left]`.
    pub inset_pt: [f64; 4],
}

/// A bitmap placed at a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrimitive {
    pub frame: Frame,
    /// Encoded bitmap bytes as returned by the rasterizer; base64 in JSON.
    #[serde(serialize_with = "serialize_base64", deserialize_with = "deserialize_base64")]
    pub data: Vec<u8>,
}

/// One cell of a table primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub runs: Vec<TextRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillProps>,
    /// `[top, right, bottom, left]`; `None` means no border on that edge.
    pub borders: [Option<LineProps>; 4],
    pub align: TextAlign,
    pub valign: VerticalAlign,
    /// Cell margins in points, `[top, right, bottom, left]`.
    pub margin_pt: [f64; 4],
    pub col_span: u32,
    pub row_span: u32,
}

/// A native table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePrimitive {
    pub frame: Frame,
    /// Column widths in inches.
    pub column_widths: Vec<f64>,
    /// Row heights in inches.
    pub row_heights: Vec<f64>,
    pub rows: Vec<Vec<TableCell>>,
}

/// One emitted vector drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawPrimitive {
    Shape(ShapePrimitive),
    TextBlock(TextBlockPrimitive),
    Image(ImagePrimitive),
    Table(TablePrimitive),
}

impl DrawPrimitive {
    pub fn as_shape(&self) -> Option<&ShapePrimitive> {
        match self {
            DrawPrimitive::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_text_block(&self) -> Option<&TextBlockPrimitive> {
        match self {
            DrawPrimitive::TextBlock(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TablePrimitive> {
        match self {
            DrawPrimitive::Table(table) => Some(table),
            _ => None,
        }
    }
}

pub(crate) fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

pub(crate) fn deserialize_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded).map_err(serde::de::Error::custom)
}
