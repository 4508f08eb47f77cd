use thiserror::Error;

/// Errors that can occur while compiling a Styled Box Tree into slide primitives.
///
/// Only `InputMissing`, `Json` and `Internal` ever abort an export. `UnresolvableColor` and
/// `RasterizationFailure` are produced by the resolver and finalizer and are recovered
/// locally: the walker turns them into diagnostics and keeps emitting.
#[derive(Error, Debug)]
pub enum ExportError {
    /// There is no styled tree or no slide to export.
    #[error("Nothing to export: {0}")]
    InputMissing(String),

    /// A colour value could not be parsed.
    #[error("Unresolvable color value: {0:?}")]
    UnresolvableColor(String),

    /// The rasterizer could not produce an image for a node.
    #[error("Rasterization failed for {0}")]
    RasterizationFailure(String),

    /// The styled tree or the configuration is not valid JSON for the model.
    #[error("Failed to decode JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal invariant was violated.
    #[error("An internal error occurred during export: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ExportError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ExportError>;
