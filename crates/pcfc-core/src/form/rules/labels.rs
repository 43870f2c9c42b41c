//! AcroForm field-name translation.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Internal form-field name to human-readable label, for the PCFC form layout.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("untitled1", "Applicant Name"),
    ("untitled2", "Branch Name"),
    ("untitled3", "Branch Address"),
    ("untitled4", "Contact Person"),
    ("untitled5", "Mobile Number"),
    ("untitled6", "Email Address"),
    ("untitled7", "IEC Number"),
    ("untitled8", "Beneficiary's Name"),
    ("untitled9", "Checkbox 1"),
    ("untitled10", "Checkbox 2"),
    ("untitled11", "Account Number"),
    ("untitled12", "Line of Business"),
    ("untitled13", "Reference Number"),
    ("untitled14", "Commodity/Service"),
    ("untitled15", "Amount 1"),
    ("untitled16", "Remittance Type"),
    ("untitled17", "Bill Amount (Figures)"),
    ("untitled18", "Bill Amount (Words)"),
    ("untitled19", "Bill Currency"),
    ("untitled20", "Remitter's Name"),
    ("untitled21", "Remitter's Address"),
    ("untitled22", "Buyer Name"),
    ("untitled23", "Buyer Address"),
    ("untitled24", "Buyer Country"),
    ("untitled25", "Buyer Account"),
    ("untitled26", "Currency 1"),
    ("untitled27", "Debit Account No."),
    ("untitled28", "Currency 2"),
    ("untitled29", "Credit Account No."),
    ("untitled30", "Forward Contract No."),
    ("untitled31", "Booking Date"),
    ("untitled32", "Forward Contract Amount"),
    ("untitled33", "Due Date of Contract"),
    ("untitled34", "Amount to be Utilized"),
    ("untitled35", "Exchange Rate"),
    ("untitled36", "Date"),
    ("untitled37", "Acknowledgement Number"),
    ("untitled38", "Reference Number 2"),
    ("untitled39", "Checkbox 3"),
    ("untitled40", "Mobile"),
    ("untitled41", "Email"),
    ("untitled42", "Address"),
    ("untitled43", "City"),
    ("untitled44", "State"),
    ("untitled45", "Pin Code"),
    ("untitled46", "Country"),
    ("untitled47", "IFSC Code"),
    ("untitled48", "Bank Name"),
    ("untitled49", "Branch Code"),
    ("untitled50", "Account Type"),
    ("untitled51", "Account Number 2"),
    ("untitled52", "Checkbox 4"),
    ("untitled53", "Checkbox 5"),
    ("untitled54", "Checkbox 6"),
    ("untitled55", "PAN Number"),
    ("untitled56", "Checkbox 7"),
    ("untitled57", "Declaration"),
    ("untitled58", "FCRA No"),
    ("untitled59", "Other Details"),
];

lazy_static! {
    static ref LABEL_INDEX: HashMap<&'static str, &'static str> =
        FIELD_LABELS.iter().copied().collect();
}

/// Label for a form-field name; unknown names are returned unchanged.
pub fn field_label(name: &str) -> &str {
    LABEL_INDEX.get(name).copied().unwrap_or(name)
}
