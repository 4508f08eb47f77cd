//! Functions for flattening the inline content of a styled box into ordered `TextRun`s
//! and for deriving the paragraph-level settings (alignment, spacing, insets) of a text block.

use log::debug;

use super::{
    constants::*,
    diagnostics::Diagnostics,
    fonts::{primary_family, safe_font_face},
    utils::{css_length_to_pt, geometry_to_frame, px_to_pt, resolve_paint_reported},
};
use crate::config::ExportConfig;
use crate::models::{
    common::Geometry,
    primitives::TextBlockPrimitive,
    styled_box::{BoxNode, BoxTag, ResolvedStyle, StyledBox},
    text::{RunStyle, TextAlign, TextRun, Underline, VerticalAlign},
};

/// Flattens the inline content of `node` into ordered runs.
///
/// Children are visited in document order. Every text leaf takes its style from its nearest
/// enclosing element, `break` elements become line-break markers, and invisible descendants
/// are skipped. Block-level whitespace trimming happens once at the end, not per run.
///
/// # Arguments
/// * `node` - The element whose inline content is flattened.
/// * `opacity` - The effective opacity of `node` (its own times its ancestors').
/// * `config` - Unit conversion and font settings.
/// * `diagnostics` - Receives unresolvable colours.
///
/// # Returns
/// The runs in render order. Empty runs without a break flag are removed.
pub(crate) fn flatten_text_runs(
    node: &StyledBox,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<TextRun> {
    let mut runs = Vec::new();
    collect_runs(node, opacity, config, diagnostics, &mut runs);
    let runs = finish_runs(runs);
    debug!("[flatten_text_runs] {} produced {} runs", node.label(), runs.len());
    runs
}

fn collect_runs(
    element: &StyledBox,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
    runs: &mut Vec<TextRun>,
) {
    for child in &element.children {
        match child {
            BoxNode::Text(text) => {
                let collapsed = collapse_whitespace(text);
                if collapsed.is_empty() {
                    continue;
                }
                let text = apply_text_transform(&collapsed, &element.style.text_transform);
                let style = run_style(element, opacity, config, diagnostics);
                runs.push(TextRun::styled(text, style));
            }
            BoxNode::Element(child) => {
                if child.style.is_invisible() {
                    continue;
                }
                if child.tag == BoxTag::Break {
                    runs.push(TextRun::line_break());
                    continue;
                }
                collect_runs(
                    child,
                    opacity * child.style.opacity,
                    config,
                    diagnostics,
                    runs,
                );
            }
        }
    }
}

/// Collapses every run of collapsible whitespace (space, tab, newline, CR, form feed) into a
/// single space. Non-breaking spaces are kept as authored.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C') {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }
    collapsed
}

fn apply_text_transform(text: &str, transform: &str) -> String {
    match transform.trim().to_ascii_lowercase().as_str() {
        "uppercase" => text.to_uppercase(),
        "lowercase" => text.to_lowercase(),
        "capitalize" => {
            let mut result = String::with_capacity(text.len());
            let mut at_word_start = true;
            for c in text.chars() {
                if at_word_start && c.is_alphabetic() {
                    result.extend(c.to_uppercase());
                } else {
                    result.push(c);
                }
                at_word_start = c == ' ';
            }
            result
        }
        _ => text.to_string(),
    }
}

/// Applies block-level trimming and cross-run collapsing, then drops empty runs.
fn finish_runs(mut runs: Vec<TextRun>) -> Vec<TextRun> {
    // A space already ended the previous run (or we are at the block start / after a break):
    // the next run must not start with another one.
    let mut after_space = true;
    let mut last_text: Option<usize> = None;
    for index in 0..runs.len() {
        if runs[index].break_line {
            if let Some(previous) = last_text {
                trim_end_in_place(&mut runs[previous].text);
            }
            after_space = true;
            last_text = None;
            continue;
        }
        if after_space {
            let trimmed = runs[index].text.trim_start_matches(' ').to_string();
            runs[index].text = trimmed;
        }
        if !runs[index].text.is_empty() {
            after_space = runs[index].text.ends_with(' ');
            last_text = Some(index);
        }
    }
    if let Some(last) = last_text {
        trim_end_in_place(&mut runs[last].text);
    }

    runs.retain(|run| run.break_line || !run.text.is_empty());
    runs
}

fn trim_end_in_place(text: &mut String) {
    let trimmed_len = text.trim_end_matches(' ').len();
    text.truncate(trimmed_len);
}

/// Numeric weight ≥ 600, `bold` or `bolder`.
pub(crate) fn is_bold(font_weight: &str) -> bool {
    let weight = font_weight.trim().to_ascii_lowercase();
    match weight.as_str() {
        "bold" | "bolder" => true,
        other => other.parse::<f64>().map(|w| w >= 600.0).unwrap_or(false),
    }
}

fn is_italic(font_style: &str) -> bool {
    let style = font_style.trim().to_ascii_lowercase();
    style.starts_with("italic") || style.starts_with("oblique")
}

/// Builds the run style of a text leaf from its nearest enclosing element.
fn run_style(
    element: &StyledBox,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> RunStyle {
    let style = &element.style;

    // A transparent colour keeps the text (invisible) rather than painting it black.
    let (color, transparency) =
        match resolve_paint_reported(&style.color, opacity, element, diagnostics).or_placeholder() {
            Some(color) => (color.hex, color.transparency),
            None => (DEFAULT_TEXT_COLOR.to_string(), 0),
        };

    let font_face = if config.substitute_fonts {
        safe_font_face(&style.font_family).to_string()
    } else {
        primary_family(&style.font_family).to_string()
    };

    RunStyle {
        color,
        font_size_pt: px_to_pt(style.font_size, config),
        bold: is_bold(&style.font_weight),
        italic: is_italic(&style.font_style),
        font_face,
        underline: underline_for(element, opacity, diagnostics),
        letter_spacing_pt: css_length_to_pt(&style.letter_spacing, style.font_size, config)
            .filter(|spacing| *spacing != 0.0),
        transparency: (transparency > 0).then_some(transparency),
    }
}

/// `text-decoration: underline`, or a visible bottom border on an inline or paragraph-like
/// element (the "border-bottom as underline" pattern), in which case the border colour is kept.
fn underline_for(
    element: &StyledBox,
    opacity: f64,
    diagnostics: &mut Diagnostics,
) -> Option<Underline> {
    let style = &element.style;
    if style.text_decoration.to_ascii_lowercase().contains("underline") {
        return Some(Underline::default());
    }
    if !matches!(element.tag, BoxTag::Inline | BoxTag::Paragraph) {
        return None;
    }
    let bottom = &style.border.bottom;
    if !bottom.is_drawn() {
        return None;
    }
    resolve_paint_reported(&bottom.color, opacity, element, diagnostics)
        .present()
        .map(|color| Underline {
            color: Some(color.hex),
        })
}

// --- Paragraph-level settings ---

/// Maps a CSS `text-align` keyword onto a horizontal alignment.
pub(crate) fn map_text_align(value: &str) -> TextAlign {
    match value.trim().to_ascii_lowercase().as_str() {
        "center" | "-webkit-center" => TextAlign::Center,
        "right" | "end" | "-webkit-right" => TextAlign::Right,
        "justify" => TextAlign::Justify,
        _ => TextAlign::Left,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlexPosition {
    Start,
    Center,
    End,
}

fn flex_position(value: &str) -> Option<FlexPosition> {
    match value.trim().to_ascii_lowercase().as_str() {
        "flex-start" | "start" => Some(FlexPosition::Start),
        "center" => Some(FlexPosition::Center),
        "flex-end" | "end" => Some(FlexPosition::End),
        _ => None,
    }
}

/// Resolves the horizontal and vertical alignment of a text block.
///
/// Flex containers translate their centring into alignment (row: `justify-content` is
/// horizontal and `align-items` vertical; column: the reverse). Without a flex answer,
/// `vertical-align` decides, then the padding heuristic, then top.
pub(crate) fn block_alignment(style: &ResolvedStyle) -> (TextAlign, VerticalAlign) {
    let mut align = map_text_align(&style.text_align);
    let mut valign = None;

    if style.is_flex() {
        let column = style
            .flex_direction
            .trim()
            .to_ascii_lowercase()
            .starts_with("column");
        let (horizontal, vertical) = if column {
            (&style.align_items, &style.justify_content)
        } else {
            (&style.justify_content, &style.align_items)
        };
        match flex_position(horizontal) {
            Some(FlexPosition::Center) => align = TextAlign::Center,
            Some(FlexPosition::End) => align = TextAlign::Right,
            _ => {}
        }
        valign = flex_position(vertical).map(|position| match position {
            FlexPosition::Start => VerticalAlign::Top,
            FlexPosition::Center => VerticalAlign::Middle,
            FlexPosition::End => VerticalAlign::Bottom,
        });
    }

    let valign = valign
        .or_else(|| match style.vertical_align.trim().to_ascii_lowercase().as_str() {
            "middle" => Some(VerticalAlign::Middle),
            "bottom" | "text-bottom" => Some(VerticalAlign::Bottom),
            _ => None,
        })
        .or_else(|| padding_suggests_centering(style).then_some(VerticalAlign::Middle))
        .unwrap_or(VerticalAlign::Top);

    (align, valign)
}

// Heuristic, see CENTERING_PADDING_DIFF_PX.
fn padding_suggests_centering(style: &ResolvedStyle) -> bool {
    let padding = &style.padding;
    (padding.top - padding.bottom).abs() < CENTERING_PADDING_DIFF_PX
        && padding.top > CENTERING_MIN_TOP_PADDING_PX
}

/// Line spacing in points. `normal` yields `None`; a unitless value multiplies the font size.
pub(crate) fn line_spacing_pt(style: &ResolvedStyle, config: &ExportConfig) -> Option<f64> {
    let value = style.line_height.trim();
    if let Ok(multiplier) = value.parse::<f64>() {
        return Some(px_to_pt(multiplier * style.font_size, config));
    }
    css_length_to_pt(value, style.font_size, config)
}

/// Builds the text block for a node classified as a text leaf.
///
/// # Arguments
/// * `node` - The text-block node.
/// * `geometry` - The node's geometry with the pagination offset already applied.
/// * `opacity` - The node's effective opacity.
///
/// # Returns
/// `None` when flattening leaves no runs.
pub(crate) fn build_text_block(
    node: &StyledBox,
    geometry: &Geometry,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Option<TextBlockPrimitive> {
    let runs = flatten_text_runs(node, opacity, config, diagnostics);
    if runs.is_empty() {
        return None;
    }
    let (align, valign) = block_alignment(&node.style);
    let inset = node.style.padding.map(|px| px_to_pt(px, config));

    Some(TextBlockPrimitive {
        frame: geometry_to_frame(geometry, config),
        runs,
        align,
        valign,
        line_spacing_pt: line_spacing_pt(&node.style, config),
        inset_pt: inset.to_array(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::slides::utils::{resolve_paint, Paint};
    use crate::models::{
        common::Edges,
        styled_box::{BorderEdge, BoxTag},
    };

    fn has_visible_color(value: &str) -> bool {
        matches!(resolve_paint(value, 1.0), Ok(Paint::Solid(_)))
    }

    fn paragraph(text: &str) -> StyledBox {
        StyledBox::new(BoxTag::Paragraph, Geometry::new(0.0, 0.0, 200.0, 40.0)).with_text(text)
    }

    fn inline(tag: BoxTag, style: ResolvedStyle, text: &str) -> StyledBox {
        StyledBox::new(tag, Geometry::new(0.0, 0.0, 50.0, 20.0))
            .with_style(style)
            .with_text(text)
    }

    fn flatten(node: &StyledBox) -> Vec<TextRun> {
        let mut diagnostics = Diagnostics::new();
        flatten_text_runs(node, 1.0, &ExportConfig::default(), &mut diagnostics)
    }

    fn texts(runs: &[TextRun]) -> Vec<&str> {
        runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[test]
    fn test_whitespace_collapses_and_block_edges_trim() {
        let runs = flatten(&paragraph("  a \n b  "));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "a b");
        assert!(!runs[0].break_line);
    }

    #[test]
    fn test_nested_inline_runs_keep_nearest_style() {
        let bold = ResolvedStyle {
            font_weight: "700".to_string(),
            color: "rgb(255, 0, 0)".to_string(),
            ..Default::default()
        };
        let node = paragraph("Hello ")
            .with_child(inline(BoxTag::Inline, bold, "big"))
            .with_text(" world");
        let runs = flatten(&node);
        assert_eq!(texts(&runs), vec!["Hello ", "big", " world"]);

        let first = runs[0].style.as_ref().unwrap();
        let second = runs[1].style.as_ref().unwrap();
        assert!(!first.bold);
        assert_eq!(first.color, "000000");
        assert!(second.bold, "numeric weight 700 should be bold");
        assert_eq!(second.color, "FF0000");
        assert_eq!(second.font_size_pt, 12.0);
    }

    #[test]
    fn test_adjacent_spaces_collapse_across_runs() {
        let node = paragraph("one ").with_child(inline(BoxTag::Inline, ResolvedStyle::default(), " two"));
        assert_eq!(texts(&flatten(&node)), vec!["one ", "two"]);
    }

    #[test]
    fn test_break_becomes_unstyled_marker() {
        let node = paragraph("first ")
            .with_child(StyledBox::new(BoxTag::Break, Geometry::default()))
            .with_text(" second");
        let runs = flatten(&node);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "first");
        assert!(runs[1].break_line);
        assert!(runs[1].style.is_none());
        assert_eq!(runs[1].text, "");
        assert_eq!(runs[2].text, "second");
    }

    #[test]
    fn test_whitespace_only_leaves_are_dropped() {
        let node = StyledBox::new(BoxTag::Generic, Geometry::new(0.0, 0.0, 10.0, 10.0))
            .with_text("\n   ")
            .with_child(inline(BoxTag::Inline, ResolvedStyle::default(), "Hi"))
            .with_text("\n");
        assert_eq!(texts(&flatten(&node)), vec!["Hi"]);
    }

    #[test]
    fn test_hidden_descendants_are_skipped() {
        let hidden = ResolvedStyle {
            display: "none".to_string(),
            ..Default::default()
        };
        let node = paragraph("shown").with_child(inline(BoxTag::Inline, hidden, " secret"));
        assert_eq!(texts(&flatten(&node)), vec!["shown"]);
    }

    #[test]
    fn test_uppercase_transform() {
        let style = ResolvedStyle {
            text_transform: "uppercase".to_string(),
            ..Default::default()
        };
        let node = inline(BoxTag::Paragraph, style, "shout");
        assert_eq!(texts(&flatten(&node)), vec!["SHOUT"]);
        assert_eq!(apply_text_transform("two words", "capitalize"), "Two Words");
    }

    #[test]
    fn test_text_decoration_underline() {
        let style = ResolvedStyle {
            text_decoration: "underline solid rgb(0, 0, 0)".to_string(),
            ..Default::default()
        };
        let runs = flatten(&inline(BoxTag::Heading, style, "linked"));
        let underline = runs[0].style.as_ref().unwrap().underline.as_ref();
        assert_eq!(underline, Some(&Underline { color: None }));
    }

    #[test]
    fn test_border_bottom_underline_only_for_inline_like_tags() {
        let mut style = ResolvedStyle::default();
        style.border.bottom = BorderEdge {
            width: 2.0,
            color: "rgb(0, 128, 0)".to_string(),
            style: "solid".to_string(),
        };
        assert!(has_visible_color(&style.border.bottom.color));

        let runs = flatten(&inline(BoxTag::Inline, style.clone(), "accent"));
        let underline = runs[0].style.as_ref().unwrap().underline.clone();
        assert_eq!(underline, Some(Underline { color: Some("008000".to_string()) }));

        let runs = flatten(&inline(BoxTag::Heading, style, "title"));
        assert_eq!(runs[0].style.as_ref().unwrap().underline, None);
    }

    #[test]
    fn test_letter_spacing_and_transparency() {
        let style = ResolvedStyle {
            letter_spacing: "0.1em".to_string(),
            font_size: 20.0,
            color: "rgba(0, 0, 0, 0.5)".to_string(),
            ..Default::default()
        };
        let runs = flatten(&inline(BoxTag::Paragraph, style, "spaced"));
        let run_style = runs[0].style.as_ref().unwrap();
        assert!((run_style.letter_spacing_pt.unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(run_style.transparency, Some(50));
    }

    #[test]
    fn test_bold_and_italic_detection() {
        assert!(is_bold("bold"));
        assert!(is_bold("600"));
        assert!(!is_bold("500"));
        assert!(!is_bold("normal"));
        assert!(is_italic("italic"));
        assert!(!is_italic("normal"));
    }

    #[test]
    fn test_font_substitution_is_opt_in() {
        let style = ResolvedStyle {
            font_family: "\"Helvetica Neue\", sans-serif".to_string(),
            ..Default::default()
        };
        let node = inline(BoxTag::Paragraph, style, "font");
        let mut diagnostics = Diagnostics::new();

        let runs = flatten_text_runs(&node, 1.0, &ExportConfig::default(), &mut diagnostics);
        assert_eq!(runs[0].style.as_ref().unwrap().font_face, "Helvetica Neue");

        let config = ExportConfig {
            substitute_fonts: true,
            ..Default::default()
        };
        let runs = flatten_text_runs(&node, 1.0, &config, &mut diagnostics);
        assert_eq!(runs[0].style.as_ref().unwrap().font_face, "Arial");
    }

    #[test]
    fn test_malformed_text_color_falls_back_with_diagnostic() {
        let style = ResolvedStyle {
            color: "not-a-color".to_string(),
            ..Default::default()
        };
        let mut diagnostics = Diagnostics::new();
        let runs = flatten_text_runs(
            &inline(BoxTag::Paragraph, style, "x"),
            1.0,
            &ExportConfig::default(),
            &mut diagnostics,
        );
        assert_eq!(runs[0].style.as_ref().unwrap().color, DEFAULT_TEXT_COLOR);
        assert_eq!(diagnostics.entries().len(), 1);
    }

    #[test]
    fn test_flex_centering_and_padding_heuristic() {
        let flex = ResolvedStyle {
            display: "flex".to_string(),
            justify_content: "center".to_string(),
            align_items: "flex-end".to_string(),
            ..Default::default()
        };
        assert_eq!(block_alignment(&flex), (TextAlign::Center, VerticalAlign::Bottom));

        let column = ResolvedStyle {
            flex_direction: "column".to_string(),
            ..flex
        };
        assert_eq!(block_alignment(&column), (TextAlign::Right, VerticalAlign::Middle));

        let padded = ResolvedStyle {
            padding: Edges::new(12.0, 0.0, 10.0, 0.0),
            text_align: "center".to_string(),
            ..Default::default()
        };
        assert_eq!(block_alignment(&padded), (TextAlign::Center, VerticalAlign::Middle));

        let uneven = ResolvedStyle {
            padding: Edges::new(20.0, 0.0, 4.0, 0.0),
            ..Default::default()
        };
        assert_eq!(block_alignment(&uneven), (TextAlign::Left, VerticalAlign::Top));
    }

    #[test]
    fn test_line_spacing() {
        let config = ExportConfig::default();
        let mut style = ResolvedStyle::default();
        assert_eq!(line_spacing_pt(&style, &config), None);
        style.line_height = "24px".to_string();
        assert_eq!(line_spacing_pt(&style, &config), Some(18.0));
        style.line_height = "1.5".to_string();
        assert_eq!(line_spacing_pt(&style, &config), Some(18.0));
    }

    #[test]
    fn test_text_block_uses_padding_as_inset() {
        let style = ResolvedStyle {
            padding: Edges::new(8.0, 16.0, 8.0, 16.0),
            ..Default::default()
        };
        let node = inline(BoxTag::Paragraph, style, "inset");
        let mut diagnostics = Diagnostics::new();
        let block = build_text_block(
            &node,
            &Geometry::new(96.0, 96.0, 192.0, 48.0),
            1.0,
            &ExportConfig::default(),
            &mut diagnostics,
        )
        .expect("text block");
        assert_eq!(block.inset_pt, [6.0, 12.0, 6.0, 12.0]);
        assert_eq!(block.frame.x, 1.0);
        assert_eq!(block.frame.w, 2.0);
        // 8px top/bottom padding reads as centred
        assert_eq!(block.valign, VerticalAlign::Middle);
    }
}
