//! Career plan document renderer.
//!
//! [`Renderer::render`] always returns an [`Artifact`]: a PDF when genpdf
//! succeeds, otherwise a plain-text file holding the error message and the
//! original body.

pub mod document;
pub mod error;
mod pdf;

use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info};

pub use document::{classify, Block, Document};
pub use error::RenderError;

pub const DEFAULT_TITLE: &str = "Career Roadmap & Debate Summary";

/// Format of a rendered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pdf,
    Text,
}

impl ArtifactKind {
    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "application/pdf",
            ArtifactKind::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "pdf",
            ArtifactKind::Text => "txt",
        }
    }
}

/// A downloadable file.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Plain-text substitute used when PDF generation fails.
    pub fn fallback(reason: &str, body: &str) -> Self {
        let text = format!("PDF generation failed: {reason}\n\nOriginal content:\n{body}");
        Self { kind: ArtifactKind::Text, bytes: text.into_bytes() }
    }
}

/// Renders career plans with a font family loaded from `font_dir`.
///
/// genpdf expects `{family}-Regular.ttf`, `-Bold.ttf`, `-Italic.ttf` and
/// `-BoldItalic.ttf` inside the directory.
#[derive(Debug, Clone)]
pub struct Renderer {
    font_dir: PathBuf,
    font_family: String,
}

impl Renderer {
    pub fn new(font_dir: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self { font_dir: font_dir.into(), font_family: font_family.into() }
    }

    /// Build the document and render it. Never fails.
    pub fn render(&self, title: &str, body: &str, goal_label: &str) -> Artifact {
        let doc = Document::build(title, body, goal_label, Utc::now());
        match pdf::render_pdf(&doc, &self.font_dir, &self.font_family) {
            Ok(bytes) => {
                info!(bytes = bytes.len(), blocks = doc.blocks.len(), "PDF generated");
                Artifact { kind: ArtifactKind::Pdf, bytes }
            }
            Err(e) => {
                error!(error = %e, "PDF generation failed; returning text fallback");
                Artifact::fallback(&e.to_string(), body)
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use tracing_test::traced_test;

    const FONT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fonts");
    const FONT_FAMILY: &str = "DejaVuSans";

    #[test]
    #[traced_test]
    fn missing_fonts_fall_back_to_text_with_body() {
        let renderer = Renderer::new("/nonexistent/font/dir", "NoSuchFont");
        let artifact = renderer.render(DEFAULT_TITLE, "## Plan\n- step", "goal");

        assert_eq!(artifact.kind, ArtifactKind::Text);
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.starts_with("PDF generation failed: "));
        assert!(text.contains("NoSuchFont"));
        assert!(text.ends_with("Original content:\n## Plan\n- step"));
        assert!(logs_contain("PDF generation failed"));
    }

    #[test]
    #[traced_test]
    fn bundled_fonts_produce_a_pdf() {
        let renderer = Renderer::new(FONT_DIR, FONT_FAMILY);
        let artifact = renderer.render(DEFAULT_TITLE, "## Heading\n- item one\n\nplain text", "goal");

        assert_eq!(artifact.kind, ArtifactKind::Pdf);
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert!(logs_contain("PDF generated"));
    }

    #[test]
    fn long_words_and_empty_bodies_still_render() {
        let renderer = Renderer::new(FONT_DIR, FONT_FAMILY);
        let long_word = "x".repeat(420);
        for body in [long_word.as_str(), ""] {
            let artifact = renderer.render(DEFAULT_TITLE, body, "");
            assert_eq!(artifact.kind, ArtifactKind::Pdf);
        }
    }

    #[test]
    fn fallback_is_deterministic() {
        let renderer = Renderer::new("/nonexistent", "X");
        let a = renderer.render(DEFAULT_TITLE, "body", "goal");
        let b = renderer.render(DEFAULT_TITLE, "body", "goal");
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn artifact_kind_metadata() {
        assert_eq!(ArtifactKind::Pdf.content_type(), "application/pdf");
        assert_eq!(ArtifactKind::Pdf.extension(), "pdf");
        assert_eq!(ArtifactKind::Text.extension(), "txt");
    }
}
