//! Export configuration. Every field defaults to the constants the converter was tuned with,
//! so a partial JSON object only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::converters::slides::constants::*;
use crate::errors::Result;

/// Tunables of one export pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ExportConfig {
    /// Source px width that maps onto the full slide width.
    pub reference_width_px: f64,
    /// Slide width in inches.
    pub slide_width_in: f64,
    /// Slide height in inches.
    pub slide_height_in: f64,
    /// Font size and stroke conversion ratio.
    pub pt_per_px: f64,
    /// Minimum renderable thickness for strips and lines, in inches.
    pub min_thickness_in: f64,
    /// Boxes narrower or shorter than this are skipped.
    pub min_visible_px: f64,
    /// Maximum side difference for a box to be treated as square.
    pub near_square_tolerance_px: f64,
    /// Vertical baseline of a continuation slide, in inches.
    pub top_margin_in: f64,
    /// Safety margin kept free at the bottom of every slide, in inches.
    pub bottom_margin_in: f64,
    /// A table only moves to a new slide when its top lies below this, in inches.
    pub pagination_min_top_in: f64,
    /// Multiplier applied to box sizes for raster requests.
    pub raster_scale: f64,
    /// Re-map font families through the safe font table while flattening text.
    /// Providers normally do this already.
    pub substitute_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            reference_width_px: REFERENCE_WIDTH_PX,
            slide_width_in: SLIDE_WIDTH_IN,
            slide_height_in: SLIDE_HEIGHT_IN,
            pt_per_px: PT_PER_PX,
            min_thickness_in: MIN_THICKNESS_IN,
            min_visible_px: MIN_VISIBLE_PX,
            near_square_tolerance_px: NEAR_SQUARE_TOLERANCE_PX,
            top_margin_in: SLIDE_TOP_MARGIN_IN,
            bottom_margin_in: SLIDE_BOTTOM_MARGIN_IN,
            pagination_min_top_in: PAGINATION_MIN_TOP_IN,
            raster_scale: RASTER_SCALE,
            substitute_fonts: false,
        }
    }
}

impl ExportConfig {
    /// Parses a (possibly partial) JSON configuration object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Source pixels per physical inch.
    pub fn px_per_inch(&self) -> f64 {
        self.reference_width_px / self.slide_width_in
    }

    /// Lowest vertical position (inches) content may reach before it overflows the slide.
    pub fn usable_bottom_in(&self) -> f64 {
        self.slide_height_in - self.bottom_margin_in
    }
}
