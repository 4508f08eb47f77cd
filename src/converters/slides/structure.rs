//! Walks each slide's Styled Box Tree and records what every node emits, in paint order,
//! onto planned slides.

use std::collections::HashSet;

use log::debug;

use super::{
    diagnostics::{Diagnostic, Diagnostics},
    pagination::{PaginationState, TablePlacement},
    raster::{Emission, PendingImage, PlannedBackground, PlannedSlide},
    shapes::decompose_box,
    table::extract_table,
    text::build_text_block,
    utils::{geometry_to_frame, resolve_paint_reported},
};
use crate::config::ExportConfig;
use crate::errors::{ExportError, Result};
use crate::models::{
    primitives::DrawPrimitive,
    slide::SlideBackground,
    styled_box::{BackgroundImage, BoxTag, StyledBox, StyledSlide},
};
use crate::raster::RasterRequest;

/// Nodes whose primitives have already been produced as part of an ancestor.
/// Keyed by address: the tree is borrowed for the whole session.
type ConsumedSet = HashSet<*const StyledBox>;

/// Per-export state: everything a walk mutates lives here and nowhere else.
pub(crate) struct ExportSession<'c> {
    config: &'c ExportConfig,
    consumed: ConsumedSet,
    pagination: PaginationState,
    diagnostics: Diagnostics,
    plan: Vec<PlannedSlide>,
    /// Background of the source slide being walked, reused by its continuation slides.
    source_background: Option<PlannedBackground>,
}

impl<'c> ExportSession<'c> {
    pub fn new(config: &'c ExportConfig) -> Self {
        ExportSession {
            config,
            consumed: ConsumedSet::new(),
            pagination: PaginationState::default(),
            diagnostics: Diagnostics::new(),
            plan: Vec::new(),
            source_background: None,
        }
    }

    /// Compiles one source slide into one or more planned slides.
    pub fn compile_slide(&mut self, slide: &StyledSlide) -> Result<()> {
        let root = &slide.root;
        // Consumption never crosses source slides.
        self.consumed.clear();
        self.source_background = self.slide_background(root);
        self.pagination = PaginationState::at_slide(self.plan.len());
        self.plan.push(PlannedSlide {
            background: self.source_background.clone(),
            notes: slide.notes.clone(),
            items: Vec::new(),
        });
        debug!(
            "[compile_slide] source slide -> output slide {}",
            self.pagination.current_slide
        );

        let opacity = root.style.opacity;
        for child in sorted_children(root) {
            self.walk(child, opacity)?;
        }
        Ok(())
    }

    /// Hands over the planned slides and everything reported so far.
    pub fn finish(self) -> (Vec<PlannedSlide>, Diagnostics) {
        (self.plan, self.diagnostics)
    }

    fn slide_background(&mut self, root: &StyledBox) -> Option<PlannedBackground> {
        let opacity = root.style.opacity;
        let paint = resolve_paint_reported(
            &root.style.background_color,
            opacity,
            root,
            &mut self.diagnostics,
        );
        if let Some(color) = paint.present() {
            return Some(PlannedBackground::Ready(SlideBackground::Color {
                color: color.hex,
                transparency: color.transparency,
            }));
        }

        match &root.style.background_image {
            Some(BackgroundImage::Gradient(gradient)) => {
                let scale = self.config.raster_scale;
                let height_px = self.config.slide_height_in * self.config.px_per_inch();
                Some(PlannedBackground::Pending {
                    node: root.label(),
                    request: RasterRequest::Gradient {
                        gradient: gradient.clone(),
                        width_px: (self.config.reference_width_px * scale).round() as u32,
                        height_px: (height_px * scale).round() as u32,
                    },
                })
            }
            Some(BackgroundImage::Url(url)) => {
                self.diagnostics.report(Diagnostic::UnsupportedBackground {
                    node: root.label(),
                    value: url.clone(),
                });
                None
            }
            None => None,
        }
    }

    fn is_skipped(&self, node: &StyledBox) -> bool {
        node.style.is_invisible()
            || node.geometry.width < self.config.min_visible_px
            || node.geometry.height < self.config.min_visible_px
            || self.consumed.contains(&(node as *const StyledBox))
    }

    fn consume_subtree(&mut self, node: &StyledBox) {
        self.consumed.insert(node as *const StyledBox);
        for child in node.element_children() {
            self.consume_subtree(child);
        }
    }

    fn emit(&mut self, emission: Emission) -> Result<()> {
        let slide = self.pagination.current_slide;
        self.plan
            .get_mut(slide)
            .ok_or_else(|| ExportError::Internal(format!("no output slide {}", slide)))?
            .items
            .push(emission);
        Ok(())
    }

    fn walk(&mut self, node: &StyledBox, parent_opacity: f64) -> Result<()> {
        if self.is_skipped(node) {
            return Ok(());
        }
        let opacity = parent_opacity * node.style.opacity;

        if node.tag == BoxTag::Table {
            self.emit_table(node, opacity)?;
            self.consume_subtree(node);
            return Ok(());
        }

        let geometry = self.pagination.place(&node.geometry);
        for emission in decompose_box(node, &geometry, opacity, self.config, &mut self.diagnostics)
        {
            self.emit(emission)?;
        }

        if node.tag == BoxTag::SvgImage {
            if let Some(markup) = &node.svg_markup {
                let scale = self.config.raster_scale;
                self.emit(Emission::Pending(PendingImage {
                    node: node.label(),
                    frame: geometry_to_frame(&geometry, self.config),
                    request: RasterRequest::Icon {
                        markup: markup.clone(),
                        width_px: (geometry.width * scale).round() as u32,
                        height_px: (geometry.height * scale).round() as u32,
                    },
                }))?;
            }
            self.consume_subtree(node);
            return Ok(());
        }

        if node.has_direct_text() {
            if let Some(block) =
                build_text_block(node, &geometry, opacity, self.config, &mut self.diagnostics)
            {
                self.emit(Emission::Ready(DrawPrimitive::TextBlock(block)))?;
            }
            self.consume_subtree(node);
            return Ok(());
        }

        for child in sorted_children(node) {
            self.walk(child, opacity)?;
        }
        Ok(())
    }

    fn emit_table(&mut self, table: &StyledBox, opacity: f64) -> Result<()> {
        let next_slide = self.plan.len();
        let (placement, state) =
            self.pagination
                .place_table(&table.geometry, next_slide, self.config);
        match placement {
            TablePlacement::InPlace => {}
            TablePlacement::NewSlide => {
                self.plan.push(PlannedSlide {
                    background: self.source_background.clone(),
                    notes: None,
                    items: Vec::new(),
                });
                self.diagnostics.report(Diagnostic::TablePaginated {
                    node: table.label(),
                    slide: state.current_slide,
                });
            }
            TablePlacement::Overflowing => {
                self.diagnostics.report(Diagnostic::OverflowingTable {
                    node: table.label(),
                    slide: state.current_slide,
                });
            }
        }
        self.pagination = state;

        let geometry = self.pagination.place(&table.geometry);
        let primitive = extract_table(table, &geometry, opacity, self.config, &mut self.diagnostics);
        self.emit(Emission::Ready(DrawPrimitive::Table(primitive)))
    }
}

/// Element children in paint order: ascending z-index, document order among equals.
fn sorted_children(node: &StyledBox) -> Vec<&StyledBox> {
    let mut children: Vec<&StyledBox> = node.element_children().collect();
    children.sort_by_key(|child| child.z_index);
    children
}
