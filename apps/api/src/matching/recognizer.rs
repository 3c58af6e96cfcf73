//! Text Recognizer — turns an uploaded resume file into a single string.
//!
//! Images go through an OCR backend (`TesseractRecognizer` by default).
//! PDFs are read through their embedded text layer instead.
//!
//! Backends are loaded once at startup and shared as `Arc<dyn TextRecognizer>`.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::matching::error::PipelineError;

/// All text fragments detected in one file, joined in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedText(String);

impl RecognizedText {
    /// Joins fragments with a single space, keeping their order.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fragments
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// A text recognition backend. Implementations must be safe to call from several
/// threads at once; a backend holding mutable model state serializes itself.
pub trait TextRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Reads the file at `path` and returns the recognized text.
    /// Never modifies or removes the file.
    fn recognize(&self, path: &Path) -> Result<RecognizedText, PipelineError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Tesseract CLI backend
// ────────────────────────────────────────────────────────────────────────────

/// OCR through the `tesseract` command line tool, plain text output on stdout.
/// Each non-empty output line is one fragment.
pub struct TesseractRecognizer {
    command: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(command: &str, language: &str, gpu: bool) -> Self {
        if gpu {
            warn!("GPU acceleration requested but the tesseract backend runs on CPU only");
        }
        Self {
            command: command.to_string(),
            language: language.to_string(),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, path: &Path) -> Result<RecognizedText, PipelineError> {
        std::fs::metadata(path).map_err(|e| {
            PipelineError::Extraction(format!("cannot read {}: {e}", path.display()))
        })?;

        let output = Command::new(&self.command)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("3")
            .output()
            .map_err(|e| {
                PipelineError::Extraction(format!("failed to run {}: {e}", self.command))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Extraction(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = RecognizedText::from_fragments(
            stdout.lines().map(str::trim).filter(|line| !line.is_empty()),
        );
        debug!(
            "tesseract recognized {} chars from {}",
            text.as_str().len(),
            path.display()
        );
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF text layer
// ────────────────────────────────────────────────────────────────────────────

/// Reads the embedded text of a PDF. Scanned PDFs without a text layer yield
/// empty text rather than an error.
pub struct PdfTextRecognizer;

impl TextRecognizer for PdfTextRecognizer {
    fn name(&self) -> &'static str {
        "pdf-text"
    }

    fn recognize(&self, path: &Path) -> Result<RecognizedText, PipelineError> {
        let raw = pdf_extract::extract_text(path).map_err(|e| {
            PipelineError::Extraction(format!("PDF text extraction failed: {e}"))
        })?;
        Ok(RecognizedText::from_fragments(raw.split_whitespace()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Format routing
// ────────────────────────────────────────────────────────────────────────────

/// Sends `.pdf` files to the PDF text layer and everything else to the image backend.
pub struct DocumentRecognizer {
    image: Arc<dyn TextRecognizer>,
    pdf: PdfTextRecognizer,
}

impl DocumentRecognizer {
    pub fn new(image: Arc<dyn TextRecognizer>) -> Self {
        Self {
            image,
            pdf: PdfTextRecognizer,
        }
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

impl TextRecognizer for DocumentRecognizer {
    fn name(&self) -> &'static str {
        self.image.name()
    }

    fn recognize(&self, path: &Path) -> Result<RecognizedText, PipelineError> {
        if is_pdf(path) {
            self.pdf.recognize(path)
        } else {
            self.image.recognize(path)
        }
    }
}
