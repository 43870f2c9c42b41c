//! Error types for the pcfc-core library.

use thiserror::Error;

/// Main error type for the pcfc library.
#[derive(Error, Debug)]
pub enum PcfcError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the PDF collaborator boundary.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("{0}")]
    Parse(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The declared form-field structure could not be read.
    #[error("{0}")]
    Form(String),

    /// Failed to extract page text.
    #[error("Error extracting text: {0}")]
    TextExtraction(String),
}

/// Result type for the pcfc library.
pub type Result<T> = std::result::Result<T, PcfcError>;
