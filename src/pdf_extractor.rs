use std::fs;
use std::path::Path;
use log::debug;

use crate::errors::ExtractionError;

// @module: PDF text extraction

/// Produces the ordered text of a document
///
/// The pipeline depends on this call shape only; tests substitute canned
/// text for real PDF parsing.
pub trait TextExtractor: Send + Sync {
    /// Extract the full document text in reading order
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

// @struct: PDF text extraction utility
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the text of every page, in page order, joined with newlines.
    ///
    /// Leading and trailing whitespace of the final result is stripped. An
    /// empty result is valid and means the document has nothing to
    /// synthesize; it is not an error.
    pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String, ExtractionError> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| ExtractionError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            ExtractionError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        debug!("Extracted {} page(s) from {:?}", pages.len(), path);

        Ok(pages.join("\n").trim().to_string())
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        PdfExtractor::extract_text(path)
    }
}
