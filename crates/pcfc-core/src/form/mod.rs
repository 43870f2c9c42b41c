//! PCFC form extraction.
//!
//! Two paths produce a raw label/value mapping: the declared AcroForm fields
//! of a fillable PDF, or regex concepts matched in the page text. Both feed
//! the same validation/correction stage.

mod extractor;
pub mod rules;

use std::path::Path;

pub use extractor::FormExtractor;
pub use rules::{assign_fields, clean_text, match_concepts, validate_and_correct};

use crate::error::PdfError;
use crate::models::result::ExtractionResult;

/// Extract and correct the form fields of a PDF with default settings.
pub fn extract_from_pdf(bytes: &[u8]) -> ExtractionResult {
    FormExtractor::new().extract(bytes)
}

/// Read a PDF from disk and extract it with default settings.
pub fn extract_file(path: &Path) -> ExtractionResult {
    FormExtractor::new().extract_file(path)
}

/// Cleaned, uncorrected AcroForm fields keyed by label.
pub fn extract_acroform(bytes: &[u8]) -> ExtractionResult {
    FormExtractor::new().extract_acroform(bytes)
}

/// Text of every page, each followed by a newline.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    FormExtractor::new().extract_text(bytes)
}

/// Concepts matched in the page text, run through correction.
pub fn extract_concepts(bytes: &[u8]) -> ExtractionResult {
    FormExtractor::new().extract_concepts(bytes)
}
