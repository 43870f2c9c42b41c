//! Regex tables for PCFC concept extraction and field validation.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::models::result::FieldMap;

lazy_static! {
    /// Concepts pulled from unstructured page text, each with one capture group.
    pub static ref CONCEPT_PATTERNS: Vec<(&'static str, Regex)> = [
        // Applicant
        ("applicant_name", r"(?:Applicant['\s]*Name|Name of Applicant)[\s:]*\n?([^\n\r]+)"),
        ("applicant_address", r"(?:Applicant['\s]*Address|Address of Applicant)[\s:]*\n?([^\n\r]+(?:\n[^\n\r]+)*)"),
        ("contact_person", r"(?:Contact\s+person['\s]*name|Contact Person)[\s:]*\n?([^\n\r]+)"),
        ("mobile", r"(?:Mobile\s+Number|Phone|Contact)[\s:]*\n?([0-9+\-\s]{8,15})"),
        ("email", r"(?:E\s?Mail\s?ID|Email|Email ID)[\s:]*\n?([^\s]+@[^\s]+\.[^\s]+)"),
        ("iec", r"(?:Import\s+Export\s+Code|IEC)[\s:]*\n?([A-Za-z0-9]{10})"),

        // Financing
        ("tenor_days", r"(?:Tenor\s*\(Number\s+of\s+days\)|Tenor)[\s:]*\n?([0-9]{1,4})"),
        ("po_or_lc_ref", r"(?:LC/|Purchase\s+Order|PO)\s*reference\s+number[\s:]*\n?([^\n\r]+)"),
        ("po_or_lc_date", r"(?:Dated|Date)[\s:]*\n?([0-9./-]{8,12})"),
        ("order_value", r"(?:Order\s+Value|Value)[\s:]*\n?([0-9,.\sA-Z]+)"),
        ("commodity", r"(?:Commodity|Goods)[\s:]*\n?([^\n\r]+)"),
        ("loan_currency", r"(?:Loan\s+Currency|Currency)[\s:]*\n?([A-Z]{3})"),
        ("loan_amount_fig", r"(?:Loan\s+amount\s*\(In\s+figures\)|Amount in Figures)[\s:]*\n?([0-9,.\s]+)"),
        ("loan_amount_words", r"(?:Loan\s+amount\s*\(In\s+words\)|Amount in Words)[\s:]*\n?([A-Za-z\s\-]+)"),

        // Shipment
        ("last_shipment_date", r"(?:Last\s+shipment\s+date|Shipment Date)[\s:]*\n?([0-9./-]{8,12})"),
        ("hs_code", r"(?:H\s?S\s?Code|HS Code|Harmonized Code)[\s:]*\n?([0-9]+)"),
        ("origin_country", r"(?:Country\s+of\s+origin\s+of\s+goods|Origin Country)[\s:]*\n?([^\n\r]+)"),
        ("destination_country", r"(?:Country\s+of\s+destination\s+of\s+goods|Destination Country)[\s:]*\n?([^\n\r]+)"),

        // Buyer
        ("buyer_name", r"(?:Buyer['\s]*Name|Name of Buyer)[\s:]*\n?([^\n\r]+)"),
        ("buyer_address", r"(?:Buyer['\s]*Address|Address of Buyer)[\s:]*\n?([^\n\r]+(?:\n[^\n\r]+)*)"),
        ("credit_account_number", r"(?:Credit\s+the\s+proceeds.*?account\s+number|Account Number)[\s:]*\n?([0-9]+)"),

        // Identifiers and bank
        ("pan_number", r"(?:PAN\s+Number|PAN)[\s:]*\n?([A-Z]{5}[0-9]{4}[A-Z])"),
        ("gst_number", r"(?:GST\s+Number|GSTIN)[\s:]*\n?([0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]{3})"),
        ("bank_name", r"(?:Bank\s+Name|Name of Bank)[\s:]*\n?([^\n\r]+)"),
        ("ifsc_code", r"(?:IFSC\s+Code|IFSC)[\s:]*\n?([A-Z]{4}[0-9]{7})"),
        ("branch_name", r"(?:Branch\s+Name|Branch)[\s:]*\n?([^\n\r]+)"),
    ]
    .into_iter()
    .map(|(concept, pattern)| (concept, Regex::new(pattern).unwrap()))
    .collect();

    /// Full-string shape of labels with a strict format.
    pub static ref FIELD_VALIDATION: HashMap<&'static str, Regex> = [
        ("Mobile Number", r"^[0-9+\-\s]{8,15}$"),
        ("Email Address", r"^[^\s]+@[^\s]+\.[^\s]+$"),
        ("Account Number", r"^[0-9]+$"),
        ("IEC Number", r"^[A-Za-z0-9]{10}$"),
        ("PAN Number", r"^[A-Z]{5}[0-9]{4}[A-Z]$"),
        ("IFSC Code", r"^[A-Z]{4}[0-9]{7}$"),
        ("Pin Code", r"^[0-9]{6}$"),
        ("Bill Amount (Figures)", r"^[0-9,.\s]+$"),
        ("Exchange Rate", r"^[0-9.]+$"),
        ("Date", r"^[0-9./-]{8,12}$"),
        ("Booking Date", r"^[0-9./-]{8,12}$"),
        ("Due Date of Contract", r"^[0-9./-]{8,12}$"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect();

    // Correction searches
    pub static ref EMBEDDED_EMAIL: Regex = Regex::new(r"[^\s]+@[^\s]+\.[^\s]+").unwrap();
    pub static ref EMBEDDED_AMOUNT: Regex = Regex::new(r"[0-9,.\s]+").unwrap();
    pub static ref EMBEDDED_DATE: Regex = Regex::new(r"[0-9./-]{8,12}").unwrap();
    pub static ref EMBEDDED_PAN: Regex = Regex::new(r"[A-Z]{5}[0-9]{4}[A-Z]").unwrap();
    pub static ref EMBEDDED_IFSC: Regex = Regex::new(r"[A-Z]{4}[0-9]{7}").unwrap();
}

/// Validation pattern for a label, if the label has a strict format.
pub fn validation_pattern(label: &str) -> Option<&'static Regex> {
    FIELD_VALIDATION.get(label)
}

/// Apply every concept pattern to the full text, keeping the first match of each.
pub fn match_concepts(text: &str) -> FieldMap {
    let mut concepts = FieldMap::new();

    for (concept, pattern) in CONCEPT_PATTERNS.iter() {
        let Some(value) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let value = value.as_str().trim();
        trace!("Concept {} matched {:?}", concept, value);
        concepts.insert((*concept).to_string(), value.to_string());
    }

    concepts
}
