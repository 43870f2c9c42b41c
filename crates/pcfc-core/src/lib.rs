//! Core library for PCFC trade-finance form extraction.
//!
//! This crate provides:
//! - PDF access (declared AcroForm fields and per-page text) on top of lopdf
//! - AcroForm extraction with field-name translation
//! - Regex concept extraction from unstructured page text
//! - Value cleaning and per-label validation/correction

pub mod error;
pub mod form;
pub mod models;
pub mod pdf;

pub use error::{PcfcError, PdfError, Result};
pub use form::{
    FormExtractor, assign_fields, clean_text, extract_acroform, extract_concepts, extract_file,
    extract_from_pdf, extract_text, match_concepts, validate_and_correct,
};
pub use models::config::{ExtractionConfig, PcfcConfig, ServerConfig};
pub use models::result::{ExtractionResult, FieldMap};
pub use pdf::{FormField, PdfDocument, PdfSource};
