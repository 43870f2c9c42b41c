//! PDF access: declared form fields and page text.

mod document;

pub use document::{FormField, PdfDocument};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Capabilities the extractors need from a parsed PDF.
pub trait PdfSource {
    /// Declared interactive-form fields, empty when the document has no form.
    fn form_fields(&self) -> Result<Vec<FormField>>;

    /// Extracted text of every page, in page order.
    fn pages_text(&self) -> Result<Vec<String>>;
}

#[cfg(test)]
pub(crate) use document::tests::form_pdf;
