//! lopdf-backed document access with a pdf-extract text fallback.

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace, warn};

use super::{PdfSource, Result};
use crate::error::PdfError;

/// Maximum `/Kids` nesting followed when walking the field tree.
const MAX_FIELD_DEPTH: usize = 32;

/// A parsed PDF document.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

/// A declared AcroForm field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Fully qualified field name (`parent.child`).
    pub name: String,
    /// The field's `/V` entry, stringified.
    pub value: Option<String>,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The stored value, or `None` when the field has no `/V` entry at all.
    pub fn resolve_value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl PdfDocument {
    /// Parse a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        debug!("Loaded PDF with {} pages", document.get_pages().len());
        Ok(Self { document, raw_data })
    }

    fn acroform_fields(&self) -> Result<Option<&Vec<Object>>> {
        let catalog = self
            .document
            .catalog()
            .map_err(|e| PdfError::Form(e.to_string()))?;

        let Ok(acroform) = catalog.get(b"AcroForm") else {
            return Ok(None);
        };
        let acroform = self.resolve(acroform)?.as_dict().map_err(form_error)?;

        let Ok(fields) = acroform.get(b"Fields") else {
            return Ok(None);
        };
        let fields = self.resolve(fields)?.as_array().map_err(form_error)?;
        Ok(Some(fields))
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> Result<&'a Object> {
        self.document
            .dereference(object)
            .map(|(_, resolved)| resolved)
            .map_err(form_error)
    }

    fn collect_fields(
        &self,
        object: &Object,
        parent: Option<&str>,
        depth: usize,
        seen: &mut HashSet<ObjectId>,
        out: &mut Vec<FormField>,
    ) -> Result<()> {
        if depth > MAX_FIELD_DEPTH {
            warn!("Form field tree deeper than {}, truncating", MAX_FIELD_DEPTH);
            return Ok(());
        }
        if let Object::Reference(id) = object {
            if !seen.insert(*id) {
                return Ok(());
            }
        }

        let dict = self.resolve(object)?.as_dict().map_err(form_error)?;

        // Widgets without /T belong to their parent field
        let name = match dict.get(b"T") {
            Ok(title) => {
                let partial = self.stringify(self.resolve(title)?);
                Some(match parent {
                    Some(parent) => format!("{}.{}", parent, partial),
                    None => partial,
                })
            }
            Err(_) => None,
        };

        if let Some(name) = &name {
            let value = self.field_value(dict)?;
            trace!("Form field {:?} = {:?}", name, value);
            out.push(FormField::new(name.clone(), value));
        }

        if let Ok(kids) = dict.get(b"Kids") {
            let kids = self.resolve(kids)?.as_array().map_err(form_error)?;
            let parent = name.as_deref().or(parent);
            for kid in kids {
                self.collect_fields(kid, parent, depth + 1, seen, out)?;
            }
        }

        Ok(())
    }

    fn field_value(&self, dict: &Dictionary) -> Result<Option<String>> {
        match dict.get(b"V") {
            Ok(value) => Ok(Some(self.stringify(self.resolve(value)?))),
            Err(_) => Ok(None),
        }
    }

    /// Render a PDF object the way a form value is displayed.
    fn stringify(&self, object: &Object) -> String {
        match object {
            Object::String(bytes, _) => decode_text_string(bytes),
            Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
            Object::Integer(value) => value.to_string(),
            Object::Real(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Array(items) => items
                .iter()
                .map(|item| match self.resolve(item) {
                    Ok(item) => self.stringify(item),
                    Err(_) => String::new(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Object::Reference(_) => match self.resolve(object) {
                Ok(resolved) if !matches!(resolved, Object::Reference(_)) => {
                    self.stringify(resolved)
                }
                _ => String::new(),
            },
            _ => String::new(),
        }
    }

    fn whole_document_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl PdfSource for PdfDocument {
    fn form_fields(&self) -> Result<Vec<FormField>> {
        let Some(roots) = self.acroform_fields()? else {
            debug!("No AcroForm dictionary declared");
            return Ok(Vec::new());
        };

        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        for root in roots {
            self.collect_fields(root, None, 0, &mut seen, &mut fields)?;
        }

        debug!("Found {} declared form fields", fields.len());
        Ok(fields)
    }

    fn pages_text(&self) -> Result<Vec<String>> {
        let pages = self.document.get_pages();
        let mut texts = Vec::with_capacity(pages.len());

        for page in pages.keys() {
            match self.document.extract_text(&[*page]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!(
                        "lopdf could not decode page {} ({}), falling back to pdf-extract",
                        page, e
                    );
                    return Ok(vec![self.whole_document_text()?]);
                }
            }
        }

        Ok(texts)
    }
}

fn form_error(e: lopdf::Error) -> PdfError {
    PdfError::Form(e.to_string())
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8 with BOM, else PDFDocEncoding).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(utf8).into_owned();
    }
    bytes.iter().filter_map(|&b| pdf_doc_char(b)).collect()
}

/// Map a PDFDocEncoding byte to its character (ISO 32000-1, Table D.2).
///
/// Differs from Latin-1 in 0x18..=0x1F, 0x80..=0xA0 and 0xAD; undefined codes
/// yield `None`.
fn pdf_doc_char(byte: u8) -> Option<char> {
    let c = match byte {
        0x18 => '\u{02D8}', // breve
        0x19 => '\u{02C7}', // caron
        0x1A => '\u{02C6}', // circumflex
        0x1B => '\u{02D9}', // dotaccent
        0x1C => '\u{02DD}', // hungarumlaut
        0x1D => '\u{02DB}', // ogonek
        0x1E => '\u{02DA}', // ring
        0x1F => '\u{02DC}', // tilde
        0x80 => '\u{2022}', // bullet
        0x81 => '\u{2020}', // dagger
        0x82 => '\u{2021}', // daggerdbl
        0x83 => '\u{2026}', // ellipsis
        0x84 => '\u{2014}', // emdash
        0x85 => '\u{2013}', // endash
        0x86 => '\u{0192}', // florin
        0x87 => '\u{2044}', // fraction
        0x88 => '\u{2039}', // guilsinglleft
        0x89 => '\u{203A}', // guilsinglright
        0x8A => '\u{2212}', // minus
        0x8B => '\u{2030}', // perthousand
        0x8C => '\u{201E}', // quotedblbase
        0x8D => '\u{201C}', // quotedblleft
        0x8E => '\u{201D}', // quotedblright
        0x8F => '\u{2018}', // quoteleft
        0x90 => '\u{2019}', // quoteright
        0x91 => '\u{201A}', // quotesinglbase
        0x92 => '\u{2122}', // trademark
        0x93 => '\u{FB01}', // fi
        0x94 => '\u{FB02}', // fl
        0x95 => '\u{0141}', // Lslash
        0x96 => '\u{0152}', // OE
        0x97 => '\u{0160}', // Scaron
        0x98 => '\u{0178}', // Ydieresis
        0x99 => '\u{017D}', // Zcaron
        0x9A => '\u{0131}', // dotlessi
        0x9B => '\u{0142}', // lslash
        0x9C => '\u{0153}', // oe
        0x9D => '\u{0161}', // scaron
        0x9E => '\u{017E}', // zcaron
        0xA0 => '\u{20AC}', // Euro
        0x9F | 0xAD => return None,
        _ => byte as char,
    };
    Some(c)
}
