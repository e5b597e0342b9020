use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while producing a PDF.
///
/// These never reach an HTTP client: [`crate::Renderer::render`] turns them
/// into a plain-text fallback artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configured font family could not be loaded from disk.
    #[error("failed to load font family '{family}' from {dir}: {source}")]
    Font {
        dir: PathBuf,
        family: String,
        #[source]
        source: genpdf::error::Error,
    },

    /// Layout or serialization failed inside genpdf.
    #[error("PDF layout failed: {0}")]
    Pdf(#[from] genpdf::error::Error),
}
