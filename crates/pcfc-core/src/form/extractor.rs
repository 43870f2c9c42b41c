//! Form extractor combining AcroForm reading, text concepts and correction.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::rules::{assign_fields, clean_text, field_label, match_concepts};
use crate::error::PdfError;
use crate::models::config::ExtractionConfig;
use crate::models::result::{ExtractionResult, FieldMap};
use crate::pdf::{FormField, PdfDocument, PdfSource};

/// Extracts PCFC form data from PDFs.
pub struct FormExtractor {
    /// Whether to validate and correct extracted values.
    correct_fields: bool,
    /// Whether to match text concepts when no form fields are declared.
    text_fallback: bool,
}

impl FormExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            correct_fields: true,
            text_fallback: false,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_correction(config.correct_fields)
            .with_text_fallback(config.text_fallback)
    }

    /// Set field validation/correction.
    pub fn with_correction(mut self, correct: bool) -> Self {
        self.correct_fields = correct;
        self
    }

    /// Set the text-concept fallback for PDFs without form fields.
    pub fn with_text_fallback(mut self, fallback: bool) -> Self {
        self.text_fallback = fallback;
        self
    }

    /// Extract the form fields of a PDF.
    pub fn extract(&self, bytes: &[u8]) -> ExtractionResult {
        let start = Instant::now();

        let document = match PdfDocument::load(bytes) {
            Ok(document) => document,
            Err(e) => return acroform_failure(e),
        };
        let result = self.extract_document(&document);

        if let Some(fields) = result.fields() {
            info!(
                "Extracted {} fields in {}ms",
                fields.len(),
                start.elapsed().as_millis()
            );
        }
        result
    }

    /// Read a PDF from disk and extract it.
    pub fn extract_file(&self, path: &Path) -> ExtractionResult {
        match std::fs::read(path) {
            Ok(bytes) => self.extract(&bytes),
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                ExtractionResult::Error(format!("{}: {}", path.display(), e))
            }
        }
    }

    /// Extract from an already parsed document.
    pub fn extract_document<S: PdfSource>(&self, source: &S) -> ExtractionResult {
        let fields = match source.form_fields() {
            Ok(fields) => fields,
            Err(e) => return acroform_failure(e),
        };

        if fields.is_empty() {
            if self.text_fallback {
                return self.extract_document_text(source);
            }
            return ExtractionResult::no_fields();
        }

        ExtractionResult::Fields(self.finish(acroform_values(&fields)))
    }

    /// Cleaned AcroForm values keyed by label, without correction.
    pub fn extract_acroform(&self, bytes: &[u8]) -> ExtractionResult {
        let fields = PdfDocument::load(bytes).and_then(|document| document.form_fields());
        match fields {
            Ok(fields) => ExtractionResult::Fields(acroform_values(&fields)),
            Err(e) => acroform_failure(e),
        }
    }

    /// Text of every page, each followed by a newline.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError> {
        let document = PdfDocument::load(bytes).map_err(text_failure)?;
        page_text(&document)
    }

    /// Match text concepts in a PDF and run them through correction.
    pub fn extract_concepts(&self, bytes: &[u8]) -> ExtractionResult {
        match self.extract_text(bytes) {
            Ok(text) => ExtractionResult::Fields(self.finish(match_concepts(&text))),
            Err(e) => {
                warn!("{}", e);
                ExtractionResult::Error(e.to_string())
            }
        }
    }

    fn extract_document_text<S: PdfSource>(&self, source: &S) -> ExtractionResult {
        debug!("No form fields declared, matching text concepts");

        let text = match page_text(source) {
            Ok(text) => text,
            Err(e) => {
                warn!("{}", e);
                return ExtractionResult::no_fields();
            }
        };

        let concepts = match_concepts(&text);
        if concepts.is_empty() {
            return ExtractionResult::no_fields();
        }
        ExtractionResult::Fields(self.finish(concepts))
    }

    fn finish(&self, raw: FieldMap) -> FieldMap {
        if self.correct_fields {
            assign_fields(&raw)
        } else {
            raw
        }
    }
}

impl Default for FormExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate field names to labels and clean values, dropping empty ones.
fn acroform_values(fields: &[FormField]) -> FieldMap {
    let mut values = FieldMap::new();

    for field in fields {
        let Some(raw) = field.resolve_value() else {
            continue;
        };
        let label = field_label(&field.name);
        let cleaned = clean_text(raw);
        if cleaned.is_empty() {
            continue;
        }
        debug!("{} -> {}: {:?}", field.name, label, cleaned);
        values.insert(label.to_string(), cleaned);
    }

    values
}

fn page_text<S: PdfSource>(source: &S) -> Result<String, PdfError> {
    let pages = source.pages_text().map_err(text_failure)?;

    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    Ok(text)
}

fn acroform_failure(e: PdfError) -> ExtractionResult {
    warn!("AcroForm extraction failed: {}", e);
    ExtractionResult::Error(format!("AcroForm extraction failed: {}", e))
}

fn text_failure(e: PdfError) -> PdfError {
    match e {
        PdfError::TextExtraction(_) => e,
        other => PdfError::TextExtraction(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::form_pdf;
    use crate::pdf::Result as PdfResult;
    use lopdf::Object;
    use pretty_assertions::assert_eq;

    struct StubSource {
        fields: Vec<FormField>,
        pages: PdfResult<Vec<String>>,
    }

    impl StubSource {
        fn text_only(pages: &[&str]) -> Self {
            Self {
                fields: Vec::new(),
                pages: Ok(pages.iter().map(|p| p.to_string()).collect()),
            }
        }
    }

    impl PdfSource for StubSource {
        fn form_fields(&self) -> PdfResult<Vec<FormField>> {
            Ok(self.fields.clone())
        }

        fn pages_text(&self) -> PdfResult<Vec<String>> {
            match &self.pages {
                Ok(pages) => Ok(pages.clone()),
                Err(e) => Err(PdfError::TextExtraction(e.to_string())),
            }
        }
    }

    fn sample_form() -> Vec<u8> {
        form_pdf(vec![
            ("untitled1", Some(Object::string_literal("  Sharma   Textiles "))),
            ("untitled5", Some(Object::string_literal("+91 98-76 54 3210"))),
            ("untitled9", Some(Object::Name(b"Yes".to_vec()))),
            ("untitled12", Some(Object::string_literal("   "))),
            ("untitled20", None),
            ("untitled55", Some(Object::string_literal("pan: abcde1234f"))),
            ("customField", Some(Object::string_literal("Extra"))),
        ])
    }

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_corrected_fields() {
        let result = extract_sample(FormExtractor::new());

        assert_eq!(
            result,
            ExtractionResult::Fields(fields(&[
                ("Applicant Name", "Sharma Textiles"),
                ("Mobile Number", "919876543210"),
                ("Checkbox 1", "/Yes"),
                ("PAN Number", "ABCDE1234F"),
                ("customField", "Extra"),
            ]))
        );
    }

    fn extract_sample(extractor: FormExtractor) -> ExtractionResult {
        extractor.extract(&sample_form())
    }

    #[test]
    fn test_extract_without_correction() {
        let result = extract_sample(FormExtractor::new().with_correction(false));
        let fields = result.fields().unwrap();

        assert_eq!(fields["Mobile Number"], "91 98-76 54 3210");
        assert_eq!(fields["PAN Number"], "pan: abcde1234f");
    }

    #[test]
    fn test_extract_acroform_is_uncorrected() {
        let result = FormExtractor::new().extract_acroform(&sample_form());
        assert_eq!(result.fields().unwrap()["PAN Number"], "pan: abcde1234f");
        assert!(!result.fields().unwrap().contains_key("Remitter's Name"));
    }

    #[test]
    fn test_no_fields_message() {
        let result = FormExtractor::new().extract(&form_pdf(vec![]));
        assert_eq!(result, ExtractionResult::no_fields());

        // The bare AcroForm reader reports an empty mapping instead
        let raw = FormExtractor::new().extract_acroform(&form_pdf(vec![]));
        assert_eq!(raw, ExtractionResult::Fields(FieldMap::new()));
    }

    #[test]
    fn test_unparsable_bytes() {
        for result in [
            FormExtractor::new().extract(b"not a pdf at all"),
            FormExtractor::new().extract_acroform(b"hello"),
        ] {
            match result {
                ExtractionResult::Error(message) => {
                    assert!(message.starts_with("AcroForm extraction failed:"), "{}", message)
                }
                other => panic!("expected error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_extract_text_failure_is_tagged() {
        let err = FormExtractor::new().extract_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::TextExtraction(_)));
        assert!(err.to_string().starts_with("Error extracting text:"));

        let result = FormExtractor::new().extract_concepts(b"not a pdf");
        assert!(result.is_error());
    }

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.pdf");
        std::fs::write(&path, sample_form()).unwrap();

        let result = FormExtractor::new().extract_file(&path);
        assert_eq!(result.fields().unwrap()["Applicant Name"], "Sharma Textiles");

        let missing = dir.path().join("missing.pdf");
        match FormExtractor::new().extract_file(&missing) {
            ExtractionResult::Error(message) => {
                assert!(message.starts_with(&missing.display().to_string()))
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_page_text_joins_pages() {
        let source = StubSource::text_only(&["first page", "second page"]);
        assert_eq!(page_text(&source).unwrap(), "first page\nsecond page\n");
    }

    #[test]
    fn test_text_fallback() {
        let source = StubSource::text_only(&[
            "Name of Applicant: Rao Exports",
            "IFSC Code: SBIN0001234",
        ]);

        let without = FormExtractor::new().extract_document(&source);
        assert_eq!(without, ExtractionResult::no_fields());

        let with = FormExtractor::new()
            .with_text_fallback(true)
            .extract_document(&source);
        assert_eq!(
            with,
            ExtractionResult::Fields(fields(&[
                ("applicant_name", "Rao Exports"),
                ("ifsc_code", "SBIN0001234"),
            ]))
        );
    }

    #[test]
    fn test_text_fallback_without_concepts() {
        let extractor = FormExtractor::new().with_text_fallback(true);

        let empty = StubSource::text_only(&["blank form"]);
        assert_eq!(extractor.extract_document(&empty), ExtractionResult::no_fields());

        let broken = StubSource {
            fields: Vec::new(),
            pages: Err(PdfError::TextExtraction("bad font".to_string())),
        };
        assert_eq!(extractor.extract_document(&broken), ExtractionResult::no_fields());
    }

    #[test]
    fn test_declared_fields_win_over_text() {
        let source = StubSource {
            fields: vec![FormField::new("untitled47", Some("hdfc0001234".to_string()))],
            pages: Ok(vec!["IFSC Code: SBIN0001234".to_string()]),
        };

        let result = FormExtractor::new()
            .with_text_fallback(true)
            .extract_document(&source);
        assert_eq!(
            result,
            ExtractionResult::Fields(fields(&[("IFSC Code", "HDFC0001234")]))
        );
    }

    #[test]
    fn test_pdf_doc_encoded_values_survive_cleaning() {
        let bytes = form_pdf(vec![
            ("untitled12", Some(Object::string_literal(b"Pro\x93t Exports".to_vec()))),
            ("untitled14", Some(Object::string_literal(b"\x97teel Rods".to_vec()))),
        ]);

        let result = FormExtractor::new().extract(&bytes);
        assert_eq!(
            result,
            ExtractionResult::Fields(fields(&[
                ("Line of Business", "Pro\u{FB01}t Exports"),
                ("Commodity/Service", "\u{0160}teel Rods"),
            ]))
        );
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            text_fallback: true,
            correct_fields: false,
        };
        let extractor = FormExtractor::from_config(&config);
        assert!(extractor.text_fallback);
        assert!(!extractor.correct_fields);
    }
}
