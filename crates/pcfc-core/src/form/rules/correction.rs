//! Per-label validation and best-effort correction.

use tracing::debug;

use super::patterns::{
    validation_pattern, EMBEDDED_AMOUNT, EMBEDDED_DATE, EMBEDDED_EMAIL, EMBEDDED_IFSC,
    EMBEDDED_PAN,
};
use crate::models::result::FieldMap;

/// Checkbox states stored by the form; never validated or corrected.
pub const CHECKBOX_STATES: [&str; 3] = ["/Yes", "/Off", "/On"];

/// Minimum digits a mobile number must keep after stripping.
const MIN_MOBILE_DIGITS: usize = 8;

/// A correction heuristic and the label keywords that select it.
pub struct Correction {
    /// The correction applies when the label contains any of these.
    pub keywords: &'static [&'static str],
    /// Returns the corrected value, or `None` when nothing usable was found.
    pub correct: fn(&str) -> Option<String>,
}

impl Correction {
    pub fn applies_to(&self, label: &str) -> bool {
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }
}

/// Corrections in priority order; the first whose keywords match the label is used.
///
/// `PAN` and `IFSC` sit ahead of the generic `Number` class so that
/// "PAN Number" corrects `"pan: abcde1234f extra"` to `"ABCDE1234F"`; with
/// `Account`/`Number` first the same input collapses to `"1234"`.
pub const CORRECTIONS: &[Correction] = &[
    Correction {
        keywords: &["Mobile"],
        correct: mobile_digits,
    },
    Correction {
        keywords: &["Email"],
        correct: embedded_email,
    },
    Correction {
        keywords: &["PAN"],
        correct: embedded_pan,
    },
    Correction {
        keywords: &["IFSC"],
        correct: embedded_ifsc,
    },
    Correction {
        keywords: &["Account", "Number"],
        correct: all_digits,
    },
    Correction {
        keywords: &["Amount", "Rate"],
        correct: embedded_amount,
    },
    Correction {
        keywords: &["Date"],
        correct: embedded_date,
    },
];

pub fn is_checkbox_state(value: &str) -> bool {
    CHECKBOX_STATES.contains(&value)
}

/// Validate `value` against the label's expected shape and correct it if needed.
///
/// Values that are empty, checkbox states, already valid, or whose label has
/// no known format are returned unchanged. A correction that finds nothing
/// usable also leaves the value unchanged.
pub fn validate_and_correct(label: &str, value: &str) -> String {
    if value.is_empty() || is_checkbox_state(value) {
        return value.to_string();
    }

    let Some(pattern) = validation_pattern(label) else {
        return value.to_string();
    };

    if pattern.is_match(value) {
        return value.to_string();
    }

    let corrected = CORRECTIONS
        .iter()
        .find(|correction| correction.applies_to(label))
        .and_then(|correction| (correction.correct)(value))
        .filter(|corrected| !corrected.is_empty());

    match corrected {
        Some(corrected) => {
            debug!("Corrected {}: {:?} -> {:?}", label, value, corrected);
            corrected
        }
        None => {
            debug!("{} does not match its format, keeping {:?}", label, value);
            value.to_string()
        }
    }
}

/// Run every extracted field through [`validate_and_correct`].
pub fn assign_fields(fields: &FieldMap) -> FieldMap {
    fields
        .iter()
        .map(|(label, value)| (label.clone(), validate_and_correct(label, value)))
        .collect()
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn mobile_digits(value: &str) -> Option<String> {
    let digits = digits(value);
    (digits.len() >= MIN_MOBILE_DIGITS).then_some(digits)
}

fn all_digits(value: &str) -> Option<String> {
    let digits = digits(value);
    (!digits.is_empty()).then_some(digits)
}

fn embedded_email(value: &str) -> Option<String> {
    EMBEDDED_EMAIL.find(value).map(|m| m.as_str().to_string())
}

fn embedded_amount(value: &str) -> Option<String> {
    EMBEDDED_AMOUNT
        .find(value)
        .map(|m| m.as_str().trim().to_string())
}

fn embedded_date(value: &str) -> Option<String> {
    EMBEDDED_DATE.find(value).map(|m| m.as_str().to_string())
}

fn embedded_pan(value: &str) -> Option<String> {
    EMBEDDED_PAN
        .find(&value.to_uppercase())
        .map(|m| m.as_str().to_string())
}

fn embedded_ifsc(value: &str) -> Option<String> {
    EMBEDDED_IFSC
        .find(&value.to_uppercase())
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::rules::patterns::FIELD_VALIDATION;
    use pretty_assertions::assert_eq;

    fn valid_sample(label: &str) -> &'static str {
        match label {
            "Mobile Number" => "+91 9876543210",
            "Email Address" => "trade@exim.co.in",
            "Account Number" => "00112233445566",
            "IEC Number" => "AB12CD34EF",
            "PAN Number" => "ABCDE1234F",
            "IFSC Code" => "HDFC0001234",
            "Pin Code" => "400001",
            "Bill Amount (Figures)" => "1,25,000.00",
            "Exchange Rate" => "83.25",
            _ => "15/01/2025",
        }
    }

    #[test]
    fn test_valid_values_unchanged() {
        for label in FIELD_VALIDATION.keys() {
            let value = valid_sample(label);
            assert_eq!(validate_and_correct(label, value), value, "{}", label);
        }
    }

    #[test]
    fn test_correction_is_idempotent() {
        let cases = [
            ("Mobile Number", "+91 98-76 54 3210"),
            ("Email Address", "mail: trade@exim.co.in please"),
            ("Account Number", "A/C 0011-2233"),
            ("PAN Number", "pan: abcde1234f extra"),
            ("IFSC Code", "ifsc hdfc0001234"),
            ("Bill Amount (Figures)", "INR 1,25,000.00"),
            ("Exchange Rate", "@ 83.25 per USD"),
            ("Booking Date", "on 15/01/2025 at noon"),
            ("Pin Code", "PIN 4000O1"),
        ];

        for (label, raw) in cases {
            let once = validate_and_correct(label, raw);
            assert_eq!(validate_and_correct(label, &once), once, "{}", label);
        }
    }

    #[test]
    fn test_mobile_digits() {
        assert_eq!(
            validate_and_correct("Mobile Number", "+91 98-76 54 3210"),
            "919876543210"
        );
        // Too few digits to be a phone number
        assert_eq!(validate_and_correct("Mobile Number", "ext. 12-34"), "ext. 12-34");
    }

    #[test]
    fn test_pan_case_normalized() {
        assert_eq!(
            validate_and_correct("PAN Number", "pan: abcde1234f extra"),
            "ABCDE1234F"
        );
    }

    #[test]
    fn test_ifsc() {
        assert_eq!(validate_and_correct("IFSC Code", "ifsc: sbin0001234"), "SBIN0001234");
    }

    #[test]
    fn test_email() {
        assert_eq!(
            validate_and_correct("Email Address", "mail to trade@exim.co.in"),
            "trade@exim.co.in"
        );
    }

    #[test]
    fn test_account_and_number_labels() {
        assert_eq!(validate_and_correct("Account Number", "A/C 0011-2233"), "00112233");
        assert_eq!(validate_and_correct("IEC Number", "IEC 0304-0123-45"), "0304012345");
    }

    #[test]
    fn test_amount_and_rate() {
        assert_eq!(
            validate_and_correct("Bill Amount (Figures)", "1,25,000.00 INR"),
            "1,25,000.00"
        );
        assert_eq!(validate_and_correct("Exchange Rate", "83.25 INR"), "83.25");
    }

    #[test]
    fn test_dates() {
        assert_eq!(validate_and_correct("Date", "Dated 15.01.2025"), "15.01.2025");
        assert_eq!(
            validate_and_correct("Due Date of Contract", "due 2025-03-31 latest"),
            "2025-03-31"
        );
    }

    #[test]
    fn test_checkbox_states_pass_through() {
        for state in CHECKBOX_STATES {
            for label in ["Checkbox 1", "PAN Number", "Date", "Mobile Number"] {
                assert_eq!(validate_and_correct(label, state), state);
            }
        }
    }

    #[test]
    fn test_unvalidated_labels_pass_through() {
        assert_eq!(
            validate_and_correct("Applicant Name", "anything at all"),
            "anything at all"
        );
        assert_eq!(validate_and_correct("Pin Code", "PIN four hundred"), "PIN four hundred");
        assert_eq!(validate_and_correct("Date", ""), "");
    }

    #[test]
    fn test_failed_correction_keeps_original() {
        let cases = [
            ("Email Address", "not an address"),
            ("Account Number", "not provided"),
            ("Bill Amount (Figures)", "nil"),
            ("Exchange Rate", "as per contract"),
            ("Date", "tomorrow"),
            ("PAN Number", "applied for"),
            ("IFSC Code", "see cheque"),
        ];

        for (label, raw) in cases {
            assert_eq!(validate_and_correct(label, raw), raw, "{}", label);
        }
    }

    #[test]
    fn test_whitespace_only_amount_keeps_original() {
        // The amount search matches the space alone, which trims to nothing
        assert_eq!(validate_and_correct("Exchange Rate", "USD x"), "USD x");
    }

    #[test]
    fn test_priority_order() {
        let chosen = |label: &str| {
            CORRECTIONS
                .iter()
                .position(|correction| correction.applies_to(label))
        };

        assert_eq!(chosen("Mobile Number"), Some(0));
        assert_eq!(chosen("Email Address"), Some(1));
        assert_eq!(chosen("PAN Number"), Some(2));
        assert_eq!(chosen("IFSC Code"), Some(3));
        assert_eq!(chosen("IEC Number"), Some(4));
        assert_eq!(chosen("Bill Amount (Figures)"), Some(5));
        assert_eq!(chosen("Booking Date"), Some(6));
        assert_eq!(chosen("Pin Code"), None);
    }

    #[test]
    fn test_number_class_after_pan() {
        let digits_only = CORRECTIONS
            .iter()
            .find(|correction| correction.keywords.contains(&"Number"))
            .unwrap();
        assert_eq!((digits_only.correct)("pan: abcde1234f extra").as_deref(), Some("1234"));
        assert_eq!(
            validate_and_correct("PAN Number", "pan: abcde1234f extra"),
            "ABCDE1234F"
        );
    }

    #[test]
    fn test_assign_fields() {
        let raw = FieldMap::from([
            ("Mobile Number".to_string(), "+91 98-76 54 3210".to_string()),
            ("Checkbox 1".to_string(), "/Off".to_string()),
            ("Applicant Name".to_string(), "Sharma Textiles".to_string()),
        ]);

        let assigned = assign_fields(&raw);

        assert_eq!(
            assigned,
            FieldMap::from([
                ("Mobile Number".to_string(), "919876543210".to_string()),
                ("Checkbox 1".to_string(), "/Off".to_string()),
                ("Applicant Name".to_string(), "Sharma Textiles".to_string()),
            ])
        );
        // Input untouched
        assert_eq!(raw["Mobile Number"], "+91 98-76 54 3210");
    }
}
