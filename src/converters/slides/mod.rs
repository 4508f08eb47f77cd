//! Compiles a Styled Box Tree into native slide primitives.
//!
//! The entry point is `export_document`: it walks every source slide, decomposes each visible
//! box into shapes, text blocks, tables and images, resolves the raster requests concurrently
//! and writes the finished slides to a `DrawingSink`.
//!
//! # Current Features & Limitations:
//! *   Boxes become rectangles, rounded rectangles, ellipses or lines, with fills, outlines and shadows.
//! *   Unequal borders become stacked underlays (filled boxes) or edge strips (unfilled boxes).
//! *   Inline text is flattened into styled runs with CSS whitespace collapsing.
//! *   Tables become native tables; tables running off the bottom move to a continuation slide.
//! *   Gradients and inline SVG icons are delegated to a `Rasterizer`.
//! *   `url(...)` background images are reported, not reproduced.

pub(crate) mod constants;
pub mod diagnostics;
pub mod fonts;
mod pagination;
mod raster;
mod shapes;
mod structure;
mod table;
mod text;
pub mod utils;

pub use diagnostics::{Diagnostic, Diagnostics};

use log::info;
use serde::Serialize;

use crate::config::ExportConfig;
use crate::errors::{ExportError, Result};
use crate::models::styled_box::StyledDocument;
use crate::raster::Rasterizer;
use crate::sink::DrawingSink;
use raster::finalize_slides;
use structure::ExportSession;

/// Summary of one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub slides_written: usize,
    pub primitives_written: usize,
    /// Every recoverable condition met on the way, in the order it happened.
    pub diagnostics: Vec<Diagnostic>,
}

/// Exports a whole document into `sink`.
///
/// # Arguments
/// * `document` - The Styled Box Tree snapshot produced by a provider.
/// * `config` - Units, thresholds and raster settings.
/// * `rasterizer` - Renders gradients and icons. All requests are awaited together once the
///   tree has been walked.
/// * `sink` - Receives the output slides.
///
/// # Returns
/// An `ExportReport` on success. Fails with `ExportError::InputMissing` when the document has
/// no slides or a slide has no root box; nothing is written to the sink in that case.
pub async fn export_document<R, S>(
    document: &StyledDocument,
    config: &ExportConfig,
    rasterizer: &R,
    sink: &mut S,
) -> Result<ExportReport>
where
    R: Rasterizer,
    S: DrawingSink,
{
    if document.slides.is_empty() {
        return Err(ExportError::InputMissing("document has no slides".to_string()));
    }

    let mut session = ExportSession::new(config);
    for (index, slide) in document.slides.iter().enumerate() {
        if slide.root.geometry.width <= 0.0 && slide.root.children.is_empty() {
            return Err(ExportError::InputMissing(format!(
                "slide {} has no root box",
                index + 1
            )));
        }
        session.compile_slide(slide)?;
    }
    let (plan, mut diagnostics) = session.finish();

    let slides = finalize_slides(plan, rasterizer, &mut diagnostics).await;

    let mut primitives_written = 0;
    for slide in &slides {
        let index = sink.add_slide();
        if let Some(background) = &slide.background {
            sink.set_background(index, background.clone());
        }
        if let Some(notes) = &slide.notes {
            sink.set_notes(index, notes);
        }
        for primitive in &slide.primitives {
            sink.push_primitive(index, primitive.clone());
        }
        primitives_written += slide.primitives.len();
    }

    info!(
        "Exported {} source slides into {} slides ({} primitives, {} diagnostics)",
        document.slides.len(),
        slides.len(),
        primitives_written,
        diagnostics.entries().len()
    );
    Ok(ExportReport {
        slides_written: slides.len(),
        primitives_written,
        diagnostics: diagnostics.into_vec(),
    })
}
