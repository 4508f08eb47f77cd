use serde::{Deserialize, Serialize};

/// An axis-aligned box in source pixels, relative to the slide container origin.
/// The Styled-Tree Provider resolves every relative unit before handing the box over.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Geometry {
    /// Left edge in px.
    pub x: f64,
    /// Top edge in px.
    pub y: f64,
    /// Width in px.
    pub width: f64,
    /// Height in px.
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Geometry {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge in px.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The smaller of width and height.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Returns a copy moved up by `offset_px` (used once content moves to a continuation slide).
    pub fn shifted_up(&self, offset_px: f64) -> Self {
        Geometry {
            y: self.y - offset_px,
            ..*self
        }
    }
}

/// A frame in physical document units (inches). All emitted primitives are positioned with frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Four per-edge values in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Edges {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Returns the values as `[top, right, bottom, left]`, the layout primitives use.
    pub fn to_array(self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Edges {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

/// Identifies one side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in CSS order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}
