//! Colour and unit resolution: CSS colours to `RRGGBB` + transparency, px to inches and points.

use csscolorparser::Color;
use log::debug;

use crate::config::ExportConfig;
use crate::errors::{ExportError, Result};
use crate::models::{
    common::{Frame, Geometry},
    styled_box::StyledBox,
};

use super::{
    constants::PLACEHOLDER_FILL_COLOR,
    diagnostics::{Diagnostic, Diagnostics},
};

// --- Color Resolution ---

/// A colour normalised for the output format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedColor {
    /// Uppercase `RRGGBB`.
    pub hex: String,
    /// 0..=100 percent.
    pub transparency: u8,
}

impl ResolvedColor {
    /// White at full transparency, for primitives that need a concrete fill to exist.
    pub fn placeholder() -> Self {
        ResolvedColor {
            hex: PLACEHOLDER_FILL_COLOR.to_string(),
            transparency: 100,
        }
    }

    /// The opacity in 0.0..=1.0 matching `transparency`.
    pub fn opacity(&self) -> f64 {
        1.0 - f64::from(self.transparency) / 100.0
    }
}

/// The outcome of resolving a CSS colour against an opacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// No colour at all (`none`, empty).
    Absent,
    /// A colour that ends up fully transparent.
    Transparent,
    /// A visible colour.
    Solid(ResolvedColor),
}

impl Paint {
    /// Presence query: only a visible colour counts.
    pub fn present(self) -> Option<ResolvedColor> {
        match self {
            Paint::Solid(color) => Some(color),
            Paint::Absent | Paint::Transparent => None,
        }
    }

    /// Placeholder query: a transparent colour becomes white at 100% transparency,
    /// an absent colour stays absent.
    pub fn or_placeholder(self) -> Option<ResolvedColor> {
        match self {
            Paint::Solid(color) => Some(color),
            Paint::Transparent => Some(ResolvedColor::placeholder()),
            Paint::Absent => None,
        }
    }
}

/// Resolves a CSS colour string with a combined opacity in `[0, 1]`.
///
/// `transparency = round((1 - alpha * opacity) * 100)`. Fails with
/// `ExportError::UnresolvableColor` when the value is not a colour.
pub fn resolve_paint(value: &str, opacity: f64) -> Result<Paint> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(Paint::Absent);
    }

    let color: Color = trimmed
        .parse()
        .map_err(|_| ExportError::UnresolvableColor(value.to_string()))?;
    let [r, g, b, _] = color.to_rgba8();
    let alpha = f64::from(color.a).clamp(0.0, 1.0) * opacity.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return Ok(Paint::Transparent);
    }

    let transparency = ((1.0 - alpha) * 100.0).round().clamp(0.0, 100.0) as u8;
    Ok(Paint::Solid(ResolvedColor {
        hex: format!("{:02X}{:02X}{:02X}", r, g, b),
        transparency,
    }))
}

/// Resolves a colour of `node`, recovering from malformed values by reporting a diagnostic
/// and treating the paint as absent.
pub(crate) fn resolve_paint_reported(
    value: &str,
    opacity: f64,
    node: &StyledBox,
    diagnostics: &mut Diagnostics,
) -> Paint {
    resolve_paint(value, opacity).unwrap_or_else(|err| {
        debug!("[resolve_paint_reported] {}: {}", node.label(), err);
        diagnostics.report(Diagnostic::UnresolvableColor {
            node: node.label(),
            value: value.to_string(),
        });
        Paint::Absent
    })
}

// --- Unit Conversion ---

/// Converts source pixels into inches.
pub fn px_to_in(px: f64, config: &ExportConfig) -> f64 {
    px / config.px_per_inch()
}

/// Converts source pixels into points (font sizes, stroke widths, insets).
pub fn px_to_pt(px: f64, config: &ExportConfig) -> f64 {
    px * config.pt_per_px
}

/// Clamps a length in inches up to the minimum renderable thickness.
pub fn clamp_thickness(inches: f64, config: &ExportConfig) -> f64 {
    inches.max(config.min_thickness_in)
}

/// Converts a px geometry into an inch frame.
pub fn geometry_to_frame(geometry: &Geometry, config: &ExportConfig) -> Frame {
    Frame {
        x: px_to_in(geometry.x, config),
        y: px_to_in(geometry.y, config),
        w: px_to_in(geometry.width, config),
        h: px_to_in(geometry.height, config),
    }
}

/// Parses a CSS length such as `12px`, `0.5em` or `9pt` into points.
/// `em` is relative to `font_size_px`. Returns `None` for `normal` and unparseable values.
pub fn css_length_to_pt(value: &str, font_size_px: f64, config: &ExportConfig) -> Option<f64> {
    let trimmed = value.trim().to_ascii_lowercase();
    if trimmed.is_empty() || trimmed == "normal" {
        return None;
    }
    if let Some(number) = trimmed.strip_suffix("px") {
        return number.trim().parse::<f64>().ok().map(|px| px_to_pt(px, config));
    }
    if let Some(number) = trimmed.strip_suffix("em") {
        // "rem" also ends in "em"; providers resolve rem to px, so treat it like em here.
        let number = number.strip_suffix('r').unwrap_or(number);
        return number
            .trim()
            .parse::<f64>()
            .ok()
            .map(|em| px_to_pt(em * font_size_px, config));
    }
    if let Some(number) = trimmed.strip_suffix("pt") {
        return number.trim().parse::<f64>().ok();
    }
    trimmed.parse::<f64>().ok().map(|px| px_to_pt(px, config))
}
