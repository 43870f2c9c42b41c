//! Extraction result returned across the core's public boundary.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Label to value mapping produced by the extractors.
pub type FieldMap = BTreeMap<String, String>;

/// Informational message for a readable PDF without declared form fields.
pub const NO_FIELDS_MESSAGE: &str = "No form fields found in the PDF.";

/// Outcome of one extraction call.
///
/// Serializes to one of three mutually exclusive JSON shapes: the field
/// mapping itself, `{"error": ...}` or `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// Extracted label/value pairs.
    Fields(FieldMap),
    /// Recovered failure.
    Error(String),
    /// The document was readable but carried nothing to extract.
    Message(String),
}

impl ExtractionResult {
    /// The informational result for a PDF without form fields.
    pub fn no_fields() -> Self {
        Self::Message(NO_FIELDS_MESSAGE.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Field mapping, if extraction succeeded.
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            Self::Fields(fields) => Some(fields),
            _ => None,
        }
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fields(fields) => fields.serialize(serializer),
            Self::Error(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
            Self::Message(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", message)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_shapes() {
        let fields = ExtractionResult::Fields(FieldMap::from([(
            "IFSC Code".to_string(),
            "HDFC0001234".to_string(),
        )]));
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({"IFSC Code": "HDFC0001234"})
        );

        let error = ExtractionResult::Error("AcroForm extraction failed: bad".to_string());
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"error": "AcroForm extraction failed: bad"})
        );

        assert_eq!(
            serde_json::to_value(ExtractionResult::no_fields()).unwrap(),
            json!({"message": "No form fields found in the PDF."})
        );
    }
}
