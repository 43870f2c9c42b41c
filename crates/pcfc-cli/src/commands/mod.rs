//! Subcommands of the `pcfc` binary.

pub mod config;
pub mod extract;
pub mod serve;

/// Whether an uploaded or local file name looks like a PDF.
pub fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}
