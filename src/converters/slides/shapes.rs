//! Handles the decomposition of a box's visual attributes (fill, borders, radius, shadow,
//! gradient background) into an ordered stack of shape primitives.
//!
//! The stack is emitted back-to-front: border underlays, then a gradient image, then the main
//! shape, then edge strips.

use indexmap::IndexMap;
use log::debug;

use super::{
    diagnostics::{Diagnostic, Diagnostics},
    raster::{Emission, PendingImage},
    utils::{
        clamp_thickness, geometry_to_frame, px_to_in, px_to_pt, resolve_paint_reported,
        ResolvedColor,
    },
};
use crate::config::ExportConfig;
use crate::models::{
    common::{Frame, Geometry, Side},
    primitives::{DashType, DrawPrimitive, FillProps, LineProps, ShadowProps, ShapeKind, ShapePrimitive},
    styled_box::{BackgroundImage, BorderEdge, BoxShadow, CornerRadii, StyledBox},
};
use crate::raster::RasterRequest;

/// The geometry kind chosen for a box, shared by every layer of its stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ShapeOutline {
    pub kind: ShapeKind,
    pub rotation: f64,
    /// Corner radius in px for the rounded kinds.
    pub radius_px: f64,
}

/// Chooses the shape kind from geometry and corner radii, in priority order:
/// ellipse, uniform rounded rectangle, top (or rotated bottom) rounded rectangle, rectangle.
pub(crate) fn classify_shape(
    geometry: &Geometry,
    radii: &CornerRadii,
    config: &ExportConfig,
) -> ShapeOutline {
    let rect = ShapeOutline {
        kind: ShapeKind::Rect,
        rotation: 0.0,
        radius_px: 0.0,
    };
    let max_radius = radii.max();
    if max_radius <= 0.0 {
        return rect;
    }

    let near_square = (geometry.width - geometry.height).abs() <= config.near_square_tolerance_px;
    if near_square && max_radius >= geometry.min_side() / 2.0 {
        return ShapeOutline {
            kind: ShapeKind::Ellipse,
            rotation: 0.0,
            radius_px: max_radius,
        };
    }

    let CornerRadii {
        top_left,
        top_right,
        bottom_right,
        bottom_left,
    } = *radii;
    if top_left == top_right && top_right == bottom_right && bottom_right == bottom_left {
        return ShapeOutline {
            kind: ShapeKind::RoundRect,
            rotation: 0.0,
            radius_px: top_left,
        };
    }
    if top_left > 0.0 && top_right > 0.0 && bottom_left == 0.0 && bottom_right == 0.0 {
        return ShapeOutline {
            kind: ShapeKind::TopRoundRect,
            rotation: 0.0,
            radius_px: top_left.max(top_right),
        };
    }
    if bottom_left > 0.0 && bottom_right > 0.0 && top_left == 0.0 && top_right == 0.0 {
        return ShapeOutline {
            kind: ShapeKind::TopRoundRect,
            rotation: 180.0,
            radius_px: bottom_left.max(bottom_right),
        };
    }

    // Mixed radii: rounding the wrong corners looks worse than sharp ones.
    rect
}

/// `radius / (min(w, h) / 2)`, clamped to 1.0.
fn radius_ratio(outline: &ShapeOutline, geometry: &Geometry) -> Option<f64> {
    match outline.kind {
        ShapeKind::RoundRect | ShapeKind::TopRoundRect => {
            let half_min = geometry.min_side() / 2.0;
            if half_min <= 0.0 {
                return Some(1.0);
            }
            Some((outline.radius_px / half_min).min(1.0))
        }
        _ => None,
    }
}

/// A border edge that actually paints.
#[derive(Debug, Clone, PartialEq)]
struct VisibleEdge {
    side: Side,
    width_px: f64,
    color: ResolvedColor,
    dash: DashType,
}

pub(crate) fn dash_type(style: &str) -> DashType {
    match style.trim().to_ascii_lowercase().as_str() {
        "dashed" => DashType::Dash,
        "dotted" => DashType::SysDot,
        _ => DashType::Solid,
    }
}

fn visible_edge(
    node: &StyledBox,
    side: Side,
    edge: &BorderEdge,
    opacity: f64,
    diagnostics: &mut Diagnostics,
) -> Option<VisibleEdge> {
    if !edge.is_drawn() {
        return None;
    }
    let color = resolve_paint_reported(&edge.color, opacity, node, diagnostics).present()?;
    Some(VisibleEdge {
        side,
        width_px: edge.width,
        color,
        dash: dash_type(&edge.style),
    })
}

fn line_props(edge: &VisibleEdge, config: &ExportConfig) -> LineProps {
    LineProps {
        color: edge.color.hex.clone(),
        width_pt: px_to_pt(edge.width_px, config),
        dash: edge.dash,
        transparency: edge.color.transparency,
    }
}

fn fill_props(color: &ResolvedColor) -> FillProps {
    FillProps {
        color: color.hex.clone(),
        transparency: color.transparency,
    }
}

fn shadow_props(
    node: &StyledBox,
    shadow: &BoxShadow,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Option<ShadowProps> {
    let color = resolve_paint_reported(&shadow.color, opacity, node, diagnostics).present()?;
    let angle = shadow.offset_y.atan2(shadow.offset_x).to_degrees();
    Some(ShadowProps {
        opacity: color.opacity(),
        color: color.hex,
        blur_pt: px_to_pt(shadow.blur, config),
        offset_pt: px_to_pt(shadow.offset_x.hypot(shadow.offset_y), config),
        angle_deg: if angle < 0.0 { angle + 360.0 } else { angle },
    })
}

fn shape_primitive(
    outline: &ShapeOutline,
    geometry: &Geometry,
    fill: Option<&ResolvedColor>,
    line: Option<LineProps>,
    shadow: Option<ShadowProps>,
    config: &ExportConfig,
) -> Emission {
    let frame = geometry_to_frame(geometry, config);
    // Degenerate but non-empty sides (1px dividers) are kept renderable.
    let visible = |length: f64| {
        if length > 0.0 {
            clamp_thickness(length, config)
        } else {
            length
        }
    };
    Emission::Ready(DrawPrimitive::Shape(ShapePrimitive {
        kind: outline.kind,
        frame: Frame {
            w: visible(frame.w),
            h: visible(frame.h),
            ..frame
        },
        fill: fill.map(fill_props),
        line,
        shadow,
        radius_ratio: radius_ratio(outline, geometry),
        rotation: outline.rotation,
    }))
}

/// Moves the inner frame inward by one edge: top and left move the origin, all edges shrink.
fn shrink_by_edge(geometry: &mut Geometry, edge: &VisibleEdge) {
    let width = edge.width_px;
    match edge.side {
        Side::Top => {
            geometry.y += width;
            geometry.height -= width;
        }
        Side::Bottom => geometry.height -= width,
        Side::Left => {
            geometry.x += width;
            geometry.width -= width;
        }
        Side::Right => geometry.width -= width,
    }
    geometry.width = geometry.width.max(0.0);
    geometry.height = geometry.height.max(0.0);
}

/// A thin rectangle lying exactly along one edge of the box.
fn edge_strip(geometry: &Geometry, edge: &VisibleEdge, config: &ExportConfig) -> Emission {
    let frame = geometry_to_frame(geometry, config);
    let thickness = clamp_thickness(px_to_in(edge.width_px, config), config);
    // Far-side strips grow inward so they never overhang the box.
    let frame = match edge.side {
        Side::Top => Frame { h: thickness, ..frame },
        Side::Bottom => Frame {
            y: frame.y + frame.h - thickness,
            h: thickness,
            ..frame
        },
        Side::Left => Frame { w: thickness, ..frame },
        Side::Right => Frame {
            x: frame.x + frame.w - thickness,
            w: thickness,
            ..frame
        },
    };
    Emission::Ready(DrawPrimitive::Shape(ShapePrimitive {
        kind: ShapeKind::Rect,
        frame,
        fill: Some(fill_props(&edge.color)),
        line: None,
        shadow: None,
        radius_ratio: None,
        rotation: 0.0,
    }))
}

/// A box that is nothing but one border (a rule) becomes a native line along its centre.
fn rule_line(geometry: &Geometry, edge: &VisibleEdge, config: &ExportConfig) -> Option<Emission> {
    let frame = geometry_to_frame(geometry, config);
    let frame = match edge.side {
        Side::Top | Side::Bottom if edge.width_px + 0.5 >= geometry.height => Frame {
            y: frame.y + frame.h / 2.0,
            h: 0.0,
            ..frame
        },
        Side::Left | Side::Right if edge.width_px + 0.5 >= geometry.width => Frame {
            x: frame.x + frame.w / 2.0,
            w: 0.0,
            ..frame
        },
        _ => return None,
    };
    Some(Emission::Ready(DrawPrimitive::Shape(ShapePrimitive {
        kind: ShapeKind::Line,
        frame,
        fill: None,
        line: Some(line_props(edge, config)),
        shadow: None,
        radius_ratio: None,
        rotation: 0.0,
    })))
}

/// Decomposes the box of `node` into a back-to-front stack of emissions.
///
/// # Arguments
/// * `node` - The styled box being drawn.
/// * `geometry` - Its geometry with the pagination offset already applied.
/// * `opacity` - Its effective opacity.
/// * `config` - Unit conversion settings.
/// * `diagnostics` - Receives unresolvable colours and unsupported backgrounds.
///
/// # Returns
/// Zero or more emissions. An invisible box (no fill, no border, no shadow, no gradient)
/// yields nothing.
pub(crate) fn decompose_box(
    node: &StyledBox,
    geometry: &Geometry,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<Emission> {
    let style = &node.style;
    let fill = resolve_paint_reported(&style.background_color, opacity, node, diagnostics).present();

    let gradient = match &style.background_image {
        Some(BackgroundImage::Gradient(gradient)) if fill.is_none() => Some(gradient),
        Some(BackgroundImage::Url(url)) => {
            diagnostics.report(Diagnostic::UnsupportedBackground {
                node: node.label(),
                value: url.clone(),
            });
            None
        }
        _ => None,
    };

    let edges: Vec<VisibleEdge> = Side::ALL
        .iter()
        .filter_map(|side| visible_edge(node, *side, style.border.edge(*side), opacity, diagnostics))
        .collect();
    let uniform = edges.len() == 4
        && edges.windows(2).all(|pair| {
            pair[0].width_px == pair[1].width_px
                && pair[0].color == pair[1].color
                && pair[0].dash == pair[1].dash
        });
    let (outline_line, accents) = if uniform {
        (Some(line_props(&edges[0], config)), Vec::new())
    } else {
        (None, edges)
    };

    let shadow = style
        .box_shadow
        .as_ref()
        .and_then(|shadow| shadow_props(node, shadow, opacity, config, diagnostics));

    if fill.is_none() && gradient.is_none() && shadow.is_none() && accents.len() == 1 && node.children.is_empty() {
        if let Some(line) = rule_line(geometry, &accents[0], config) {
            debug!("[decompose_box] {} emitted as a rule line", node.label());
            return vec![line];
        }
    }

    let outline = classify_shape(geometry, &style.border_radius, config);
    let mut emissions = Vec::new();
    let mut inner = *geometry;

    // Underlays: one full copy per distinct accent colour, each shrinking the frame for the next.
    if fill.is_some() && !accents.is_empty() {
        let mut by_color: IndexMap<&ResolvedColor, Vec<&VisibleEdge>> = IndexMap::new();
        for edge in &accents {
            by_color.entry(&edge.color).or_default().push(edge);
        }
        for (color, group) in by_color {
            emissions.push(shape_primitive(&outline, &inner, Some(color), None, None, config));
            for edge in group {
                shrink_by_edge(&mut inner, edge);
            }
        }
    }

    if let Some(gradient) = gradient {
        emissions.push(Emission::Pending(PendingImage {
            node: node.label(),
            frame: geometry_to_frame(&inner, config),
            request: RasterRequest::Gradient {
                gradient: gradient.clone(),
                width_px: (inner.width * config.raster_scale).round().max(1.0) as u32,
                height_px: (inner.height * config.raster_scale).round().max(1.0) as u32,
            },
        }));
    }

    if fill.is_some() || outline_line.is_some() || shadow.is_some() {
        // A shadow needs a concrete fill to cast from.
        let main_fill = fill
            .clone()
            .or_else(|| shadow.as_ref().map(|_| ResolvedColor::placeholder()));
        emissions.push(shape_primitive(
            &outline,
            &inner,
            main_fill.as_ref(),
            outline_line,
            shadow,
            config,
        ));
    }

    if fill.is_none() {
        for edge in &accents {
            emissions.push(edge_strip(geometry, edge, config));
        }
    }

    debug!(
        "[decompose_box] {} -> {} emissions ({:?})",
        node.label(),
        emissions.len(),
        outline.kind
    );
    emissions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::styled_box::{BoxTag, Gradient, ResolvedStyle};

    fn config() -> ExportConfig {
        ExportConfig::default()
    }

    fn edge(width: f64, color: &str) -> BorderEdge {
        BorderEdge {
            width,
            color: color.to_string(),
            style: "solid".to_string(),
        }
    }

    fn boxed(geometry: Geometry, style: ResolvedStyle) -> StyledBox {
        StyledBox::new(BoxTag::Generic, geometry)
            .with_style(style)
            .with_text("content")
    }

    fn shapes(emissions: &[Emission]) -> Vec<&ShapePrimitive> {
        emissions
            .iter()
            .filter_map(|emission| emission.ready().and_then(DrawPrimitive::as_shape))
            .collect()
    }

    fn decompose(node: &StyledBox) -> Vec<Emission> {
        let mut diagnostics = Diagnostics::new();
        decompose_box(node, &node.geometry, 1.0, &config(), &mut diagnostics)
    }

    #[test]
    fn test_square_with_large_radius_is_ellipse_even_if_asymmetric() {
        let geometry = Geometry::new(0.0, 0.0, 100.0, 100.0);
        let radii = CornerRadii {
            top_left: 50.0,
            top_right: 10.0,
            bottom_right: 0.0,
            bottom_left: 30.0,
        };
        assert_eq!(classify_shape(&geometry, &radii, &config()).kind, ShapeKind::Ellipse);
        let near = Geometry::new(0.0, 0.0, 101.0, 100.0);
        assert_eq!(
            classify_shape(&near, &CornerRadii::uniform(60.0), &config()).kind,
            ShapeKind::Ellipse
        );
    }

    #[test]
    fn test_uniform_radius_is_round_rect_with_clamped_ratio() {
        let geometry = Geometry::new(0.0, 0.0, 200.0, 100.0);
        let outline = classify_shape(&geometry, &CornerRadii::uniform(10.0), &config());
        assert_eq!(outline.kind, ShapeKind::RoundRect);
        assert_eq!(radius_ratio(&outline, &geometry), Some(0.2));

        let pill = classify_shape(&geometry, &CornerRadii::uniform(80.0), &config());
        assert_eq!(radius_ratio(&pill, &geometry), Some(1.0));
    }

    #[test]
    fn test_top_and_bottom_rounding() {
        let geometry = Geometry::new(0.0, 0.0, 200.0, 100.0);
        let top = CornerRadii {
            top_left: 8.0,
            top_right: 8.0,
            ..Default::default()
        };
        let outline = classify_shape(&geometry, &top, &config());
        assert_eq!((outline.kind, outline.rotation), (ShapeKind::TopRoundRect, 0.0));

        let bottom = CornerRadii {
            bottom_left: 8.0,
            bottom_right: 8.0,
            ..Default::default()
        };
        let outline = classify_shape(&geometry, &bottom, &config());
        assert_eq!((outline.kind, outline.rotation), (ShapeKind::TopRoundRect, 180.0));

        let mixed = CornerRadii {
            top_left: 8.0,
            bottom_right: 8.0,
            ..Default::default()
        };
        assert_eq!(classify_shape(&geometry, &mixed, &config()).kind, ShapeKind::Rect);
    }

    #[test]
    fn test_uniform_border_is_native_outline() {
        let mut style = ResolvedStyle {
            background_color: "rgb(255, 255, 255)".to_string(),
            ..Default::default()
        };
        let border = edge(2.0, "rgb(0, 0, 0)");
        style.border.top = border.clone();
        style.border.right = border.clone();
        style.border.bottom = border.clone();
        style.border.left = border;

        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 96.0, 96.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 1);
        let line = shapes[0].line.as_ref().expect("native outline");
        assert_eq!(line.width_pt, 1.5);
        assert_eq!(line.color, "000000");
        assert_eq!(shapes[0].fill.as_ref().unwrap().color, "FFFFFF");
    }

    #[test]
    fn test_filled_box_with_unequal_edges_uses_one_underlay_per_color() {
        let mut style = ResolvedStyle {
            background_color: "rgb(240, 240, 240)".to_string(),
            ..Default::default()
        };
        style.border.top = edge(4.0, "rgb(255, 0, 0)");
        style.border.right = edge(1.0, "rgb(0, 0, 255)");
        style.border.bottom = edge(2.0, "rgb(255, 0, 0)");
        style.border.left = edge(8.0, "rgb(0, 128, 0)");

        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 192.0, 96.0), style));
        let shapes = shapes(&emissions);
        // red (top + bottom), blue (right), green (left), then the main shape
        assert_eq!(shapes.len(), 4);
        assert_eq!(shapes[0].fill.as_ref().unwrap().color, "FF0000");
        assert_eq!(shapes[0].frame, Frame { x: 0.0, y: 0.0, w: 2.0, h: 1.0 });
        assert_eq!(shapes[1].fill.as_ref().unwrap().color, "0000FF");
        assert_eq!(shapes[2].fill.as_ref().unwrap().color, "008000");

        let main = shapes[3];
        assert_eq!(main.fill.as_ref().unwrap().color, "F0F0F0");
        assert!(main.line.is_none());
        let px = 1.0 / 96.0;
        assert!((main.frame.x - 8.0 * px).abs() < 1e-9);
        assert!((main.frame.y - 4.0 * px).abs() < 1e-9);
        assert!((main.frame.w - (192.0 - 1.0 - 8.0) * px).abs() < 1e-9);
        assert!((main.frame.h - (96.0 - 4.0 - 2.0) * px).abs() < 1e-9);
    }

    #[test]
    fn test_top_and_bottom_same_color_share_an_underlay() {
        let mut style = ResolvedStyle {
            background_color: "white".to_string(),
            ..Default::default()
        };
        style.border.top = edge(3.0, "black");
        style.border.bottom = edge(3.0, "black");

        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 96.0, 48.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 2);
        assert!((shapes[1].frame.h - 42.0 / 96.0).abs() < 1e-9);
        assert!((shapes[1].frame.y - 3.0 / 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_unfilled_box_with_unequal_edges_uses_strips() {
        let mut style = ResolvedStyle::default();
        style.border.top = edge(4.0, "red");
        style.border.right = edge(1.0, "blue");
        style.border.bottom = edge(2.0, "red");
        style.border.left = edge(8.0, "green");

        let emissions = decompose(&boxed(Geometry::new(96.0, 96.0, 192.0, 96.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 4, "one strip per edge, no underlay, no main shape");
        assert!(shapes.iter().all(|shape| shape.kind == ShapeKind::Rect && shape.line.is_none()));

        let top = shapes[0];
        assert_eq!(top.frame.x, 1.0);
        assert_eq!(top.frame.y, 1.0);
        assert_eq!(top.frame.w, 2.0);
        assert!((top.frame.h - 4.0 / 96.0).abs() < 1e-9);

        let right = shapes[1];
        assert_eq!(right.frame.w, config().min_thickness_in, "1px strip is clamped");
        assert!((right.frame.x + right.frame.w - 3.0).abs() < 1e-9, "right strip ends at the box edge");

        let bottom = shapes[2];
        assert!((bottom.frame.y - (2.0 - 2.0 / 96.0)).abs() < 1e-9);
        let left = shapes[3];
        assert_eq!(left.frame.h, 1.0);
    }

    #[test]
    fn test_left_accent_keeps_rounded_kind_on_every_layer() {
        let mut style = ResolvedStyle {
            background_color: "rgb(255, 255, 255)".to_string(),
            border_radius: CornerRadii::uniform(8.0),
            ..Default::default()
        };
        style.border.left = edge(4.0, "rgb(37, 99, 235)");

        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 300.0, 80.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|shape| shape.kind == ShapeKind::RoundRect));
        assert_eq!(shapes[0].fill.as_ref().unwrap().color, "2563EB");
        assert!((shapes[1].frame.x - 4.0 / 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_goes_on_main_shape_only() {
        let mut style = ResolvedStyle {
            background_color: "white".to_string(),
            box_shadow: Some(BoxShadow {
                offset_x: 0.0,
                offset_y: 4.0,
                blur: 8.0,
                color: "rgba(0, 0, 0, 0.25)".to_string(),
            }),
            ..Default::default()
        };
        style.border.top = edge(4.0, "red");

        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 96.0, 96.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].shadow.is_none(), "underlay never carries the shadow");
        let shadow = shapes[1].shadow.as_ref().expect("main shape shadow");
        assert_eq!(shadow.offset_pt, 3.0);
        assert_eq!(shadow.blur_pt, 6.0);
        assert!((shadow.angle_deg - 90.0).abs() < 1e-9);
        assert!((shadow.opacity - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_without_fill_uses_placeholder_fill() {
        let style = ResolvedStyle {
            box_shadow: Some(BoxShadow {
                offset_x: 2.0,
                offset_y: 2.0,
                blur: 4.0,
                color: "black".to_string(),
            }),
            ..Default::default()
        };
        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 50.0, 50.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 1);
        let fill = shapes[0].fill.as_ref().unwrap();
        assert_eq!((fill.color.as_str(), fill.transparency), ("FFFFFF", 100));
    }

    #[test]
    fn test_gradient_without_solid_fill_becomes_pending_image() {
        let style = ResolvedStyle {
            background_image: Some(BackgroundImage::Gradient(Gradient::default())),
            ..Default::default()
        };
        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 96.0, 48.0), style));
        assert_eq!(emissions.len(), 1);
        match &emissions[0] {
            Emission::Pending(pending) => {
                assert_eq!(pending.frame, Frame { x: 0.0, y: 0.0, w: 1.0, h: 0.5 });
                assert!(matches!(
                    pending.request,
                    RasterRequest::Gradient { width_px: 192, height_px: 96, .. }
                ));
            }
            other => panic!("expected a pending gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_gradient_is_ignored_when_solid_fill_exists() {
        let style = ResolvedStyle {
            background_color: "red".to_string(),
            background_image: Some(BackgroundImage::Gradient(Gradient::default())),
            ..Default::default()
        };
        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 96.0, 48.0), style));
        assert_eq!(emissions.len(), 1);
        assert!(emissions[0].ready().is_some());
    }

    #[test]
    fn test_url_background_is_reported() {
        let style = ResolvedStyle {
            background_image: Some(BackgroundImage::Url("https://example.com/a.png".to_string())),
            ..Default::default()
        };
        let node = boxed(Geometry::new(0.0, 0.0, 10.0, 10.0), style);
        let mut diagnostics = Diagnostics::new();
        let emissions = decompose_box(&node, &node.geometry, 1.0, &config(), &mut diagnostics);
        assert!(emissions.is_empty());
        assert!(matches!(
            diagnostics.entries(),
            [Diagnostic::UnsupportedBackground { .. }]
        ));
    }

    #[test]
    fn test_rule_box_becomes_line() {
        let mut style = ResolvedStyle::default();
        style.border.top = edge(1.0, "rgb(200, 200, 200)");
        let node = StyledBox::new(BoxTag::Generic, Geometry::new(0.0, 96.0, 480.0, 1.0)).with_style(style);
        let emissions = decompose(&node);
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind, ShapeKind::Line);
        assert_eq!(shapes[0].frame.h, 0.0);
        assert_eq!(shapes[0].line.as_ref().unwrap().width_pt, 0.75);
    }

    #[test]
    fn test_thin_far_edge_strips_stay_inside_the_box() {
        let mut style = ResolvedStyle::default();
        style.border.top = edge(2.0, "blue");
        style.border.bottom = edge(1.0, "red");
        style.border.right = edge(1.0, "red");

        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 96.0, 96.0), style));
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 3);
        let (bottom, right) = (shapes[2], shapes[1]);
        assert_eq!(bottom.frame.h, config().min_thickness_in);
        assert!((bottom.frame.y + bottom.frame.h - 1.0).abs() < 1e-9, "bottom strip ends at the box bottom");
        assert_eq!(right.frame.w, config().min_thickness_in);
        assert!((right.frame.x + right.frame.w - 1.0).abs() < 1e-9, "right strip ends at the box right edge");
    }

    #[test]
    fn test_one_pixel_filled_divider_is_clamped_to_min_thickness() {
        let style = ResolvedStyle {
            background_color: "rgb(200, 200, 200)".to_string(),
            ..Default::default()
        };
        let node = StyledBox::new(BoxTag::Generic, Geometry::new(0.0, 96.0, 480.0, 1.0)).with_style(style);
        let emissions = decompose(&node);
        let shapes = shapes(&emissions);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].frame.h, config().min_thickness_in);
        assert_eq!(shapes[0].frame.w, 5.0);
        assert_eq!(shapes[0].fill.as_ref().unwrap().color, "C8C8C8");
    }

    #[test]
    fn test_plain_box_emits_nothing() {
        let emissions = decompose(&boxed(Geometry::new(0.0, 0.0, 50.0, 50.0), ResolvedStyle::default()));
        assert!(emissions.is_empty());
    }

    #[test]
    fn test_dashed_and_dotted_map_to_dash_types() {
        assert_eq!(dash_type("dashed"), DashType::Dash);
        assert_eq!(dash_type("dotted"), DashType::SysDot);
        assert_eq!(dash_type("double"), DashType::Solid);
    }
}
