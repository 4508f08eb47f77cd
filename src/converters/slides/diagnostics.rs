//! Recoverable conditions met during an export. None of them stops emission; they are
//! logged as they happen and handed back to the caller in the export report.

use log::{info, warn};
use serde::Serialize;

/// One recoverable condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Diagnostic {
    /// A colour could not be parsed and was treated as absent.
    UnresolvableColor { node: String, value: String },
    /// The rasterizer produced nothing; the image was left out.
    RasterizationFailure { node: String },
    /// A table moved to a continuation slide.
    TablePaginated { node: String, slide: usize },
    /// A table overflows the slide but starts too high for a new slide to help.
    OverflowingTable { node: String, slide: usize },
    /// A background image kind the compiler does not reproduce.
    UnsupportedBackground { node: String, value: String },
}

/// Collects diagnostics for one export pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::TablePaginated { node, slide } => {
                info!("Table {} moved to continuation slide {}", node, slide + 1)
            }
            other => warn!("Export diagnostic: {:?}", other),
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
