//! Compiles a Styled Box Tree (a browser-resolved snapshot of laid-out, styled DOM nodes) into
//! native slide primitives: shapes, text blocks, tables and images.

pub mod config;
pub mod converters;
pub mod errors;
pub mod models;
pub mod raster;
pub mod sink;

pub use config::ExportConfig;
pub use converters::slides::{export_document, Diagnostic, ExportReport};
pub use errors::{ExportError, Result};
pub use models::styled_box::StyledDocument;
pub use raster::{NoopRasterizer, RasterRequest, Rasterizer};
pub use sink::{DrawingSink, SlideDeck};
