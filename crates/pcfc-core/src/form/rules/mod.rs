//! Tables and rules for PCFC form fields.

pub mod cleaner;
pub mod correction;
pub mod labels;
pub mod patterns;

pub use cleaner::clean_text;
pub use correction::{assign_fields, is_checkbox_state, validate_and_correct, Correction, CORRECTIONS};
pub use labels::{field_label, FIELD_LABELS};
pub use patterns::{match_concepts, validation_pattern, CONCEPT_PATTERNS, FIELD_VALIDATION};
