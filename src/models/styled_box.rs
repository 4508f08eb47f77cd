// src/models/styled_box.rs

use serde::{Deserialize, Serialize};

use crate::models::common::{Edges, Geometry, Side};

/// The semantic kind of a styled box.
/// Only the distinctions the compiler acts on are kept; everything else is `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxTag {
    /// Any block or container element without special handling.
    #[default]
    Generic,
    /// A table row group (`thead`, `tbody`, `tfoot`).
    Section,
    /// A table.
    Table,
    /// A table row.
    Row,
    /// A table cell (`td`, `th`).
    Cell,
    /// An explicit line break (`br`).
    Break,
    /// Inline phrasing content (`span`, `a`, `strong`, `em`, ...).
    Inline,
    /// A paragraph-like block (`p`, `li`, `label`).
    Paragraph,
    /// A heading (`h1`..`h6`).
    Heading,
    /// An inline vector icon that has to be rasterized.
    SvgImage,
}

/// One border edge as resolved by the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct BorderEdge {
    /// Width in px.
    pub width: f64,
    /// CSS color value, e.g. `rgb(255, 0, 0)`.
    pub color: String,
    /// CSS border style keyword (`solid`, `dashed`, `none`, ...).
    pub style: String,
}

impl Default for BorderEdge {
    fn default() -> Self {
        BorderEdge {
            width: 0.0,
            color: String::new(),
            style: "none".to_string(),
        }
    }
}

impl BorderEdge {
    /// Whether the edge has a width and a style that draws something.
    /// Colour visibility is decided by the resolver, not here.
    pub fn is_drawn(&self) -> bool {
        self.width > 0.0
            && !matches!(
                self.style.trim().to_ascii_lowercase().as_str(),
                "none" | "hidden" | ""
            )
    }
}

/// The four border edges of a box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct BoxBorders {
    pub top: BorderEdge,
    pub right: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
}

impl BoxBorders {
    pub fn edge(&self, side: Side) -> &BorderEdge {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }
}

/// Corner radii in px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub fn uniform(radius: f64) -> Self {
        CornerRadii {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn max(&self) -> f64 {
        self.top_left
            .max(self.top_right)
            .max(self.bottom_right)
            .max(self.bottom_left)
    }
}

/// A resolved `box-shadow` (first shadow only).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct BoxShadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    /// CSS color value; its alpha becomes the shadow opacity.
    pub color: String,
}

/// The shape of a CSS gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// One colour stop of a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStop {
    /// CSS color value.
    pub color: String,
    /// Position along the gradient line, 0..=100 percent.
    pub position: f64,
}

/// Centre point of a radial gradient, in percent of the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientCenter {
    pub x: f64,
    pub y: f64,
}

/// A gradient descriptor, handed as-is to the rasterizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Gradient {
    pub kind: GradientKind,
    /// Angle in degrees for linear gradients (CSS convention, 180 = top to bottom).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<f64>,
    /// Centre for radial gradients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<GradientCenter>,
    pub stops: Vec<ColorStop>,
}

/// The classified `background-image` of a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImage {
    /// A linear or radial gradient.
    Gradient(Gradient),
    /// A bitmap referenced by URL.
    Url(String),
}

/// The resolved style snapshot of one node.
/// Inherited properties (font, colour, text transform...) are already resolved by the
/// Styled-Tree Provider, so the compiler reads them directly and never walks ancestors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ResolvedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,

    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    pub border: BoxBorders,
    pub border_radius: CornerRadii,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<BoxShadow>,

    pub text_align: String,
    pub vertical_align: String,
    pub flex_direction: String,
    pub align_items: String,
    pub justify_content: String,
    /// Padding in px.
    pub padding: Edges,

    pub font_family: String,
    /// Font size in px.
    pub font_size: f64,
    pub font_weight: String,
    pub font_style: String,
    pub letter_spacing: String,
    pub line_height: String,
    pub text_decoration: String,
    pub text_transform: String,
    pub color: String,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        ResolvedStyle {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
            background_color: "rgba(0, 0, 0, 0)".to_string(),
            background_image: None,
            border: BoxBorders::default(),
            border_radius: CornerRadii::default(),
            box_shadow: None,
            text_align: "start".to_string(),
            vertical_align: "baseline".to_string(),
            flex_direction: "row".to_string(),
            align_items: "normal".to_string(),
            justify_content: "normal".to_string(),
            padding: Edges::default(),
            font_family: "Arial".to_string(),
            font_size: 16.0,
            font_weight: "400".to_string(),
            font_style: "normal".to_string(),
            letter_spacing: "normal".to_string(),
            line_height: "normal".to_string(),
            text_decoration: "none".to_string(),
            text_transform: "none".to_string(),
            color: "rgb(0, 0, 0)".to_string(),
        }
    }
}

impl ResolvedStyle {
    /// `display: none`, `visibility: hidden|collapse` or a zero opacity.
    pub fn is_invisible(&self) -> bool {
        self.display.trim().eq_ignore_ascii_case("none")
            || matches!(
                self.visibility.trim().to_ascii_lowercase().as_str(),
                "hidden" | "collapse"
            )
            || self.opacity <= 0.0
    }

    pub fn is_flex(&self) -> bool {
        matches!(
            self.display.trim().to_ascii_lowercase().as_str(),
            "flex" | "inline-flex"
        )
    }
}

/// A child of a styled box: either a raw text leaf or a nested element.
/// JSON form: `{"text": "..."}` or `{"element": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxNode {
    Text(String),
    Element(StyledBox),
}

/// One visual node of the Styled Box Tree. Read-only input to the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct StyledBox {
    /// Optional provider-side identifier, only used in diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tag: BoxTag,
    pub geometry: Geometry,
    pub z_index: i32,
    pub style: ResolvedStyle,
    pub children: Vec<BoxNode>,
    /// Inline SVG markup for `SvgImage` nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_markup: Option<String>,
    /// Column span for table cells.
    pub col_span: u32,
    /// Row span for table cells.
    pub row_span: u32,
}

impl Default for StyledBox {
    fn default() -> Self {
        StyledBox {
            id: None,
            tag: BoxTag::Generic,
            geometry: Geometry::default(),
            z_index: 0,
            style: ResolvedStyle::default(),
            children: Vec::new(),
            svg_markup: None,
            col_span: 1,
            row_span: 1,
        }
    }
}

impl StyledBox {
    /// Creates an empty box of the given kind at the given geometry.
    pub fn new(tag: BoxTag, geometry: Geometry) -> Self {
        StyledBox {
            tag,
            geometry,
            ..Default::default()
        }
    }

    /// Iterates the element children in document order, skipping text leaves.
    pub fn element_children(&self) -> impl Iterator<Item = &StyledBox> {
        self.children.iter().filter_map(|child| match child {
            BoxNode::Element(element) => Some(element),
            BoxNode::Text(_) => None,
        })
    }

    /// True when at least one *direct* child is a text leaf with non-whitespace content.
    /// Text that only lives in deeper wrappers does not count.
    pub fn has_direct_text(&self) -> bool {
        self.children.iter().any(|child| match child {
            BoxNode::Text(text) => !text.trim().is_empty(),
            BoxNode::Element(_) => false,
        })
    }

    /// A short label for logs and diagnostics.
    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{:?}#{}", self.tag, id),
            None => format!("{:?}", self.tag),
        }
    }

    // --- builder helpers, mostly used by providers written in Rust and by tests ---

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_style(mut self, style: ResolvedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(BoxNode::Text(text.to_string()));
        self
    }

    pub fn with_child(mut self, child: StyledBox) -> Self {
        self.children.push(BoxNode::Element(child));
        self
    }
}

/// One source slide: the root box whose children are the top-level nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct StyledSlide {
    pub root: StyledBox,
    /// Speaker notes for this slide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The whole Styled Box Tree snapshot for one export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct StyledDocument {
    pub slides: Vec<StyledSlide>,
}

impl StyledDocument {
    /// Decodes a document produced by a Styled-Tree Provider.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
