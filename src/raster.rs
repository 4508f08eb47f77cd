//! The rasterizer collaborator: turns gradients and inline vector icons into bitmaps.
//! Rasterization itself lives outside this crate; the compiler only issues requests.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::models::styled_box::Gradient;

/// What the compiler asks the rasterizer to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RasterRequest {
    /// A CSS gradient rendered at the given pixel size.
    #[serde(rename_all = "camelCase")]
    Gradient {
        gradient: Gradient,
        width_px: u32,
        height_px: u32,
    },
    /// Inline SVG markup rendered at the given pixel size.
    #[serde(rename_all = "camelCase")]
    Icon {
        markup: String,
        width_px: u32,
        height_px: u32,
    },
}

/// Renders raster requests into encoded bitmap bytes (e.g. PNG).
///
/// Implementations must always complete: a failure resolves to `None`, which drops only the
/// affected image from the export. Several requests of one export are awaited concurrently.
pub trait Rasterizer {
    fn rasterize(&self, request: &RasterRequest) -> impl Future<Output = Option<Vec<u8>>>;
}

/// A rasterizer that never produces an image. Gradients and icons are left out of the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRasterizer;

impl Rasterizer for NoopRasterizer {
    async fn rasterize(&self, _request: &RasterRequest) -> Option<Vec<u8>> {
        None
    }
}
