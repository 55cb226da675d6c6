//! Textual field validation and escaping.
//!
//! Pure functions, no state. Address fields are trimmed, checked for
//! presence, and HTML-escaped before they are stored or echoed back.

use serde::Serialize;

/// One field-level validation failure, echoed back in the 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending form field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Sanitized KYC text fields, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycFields {
    pub residential_address: String,
    pub work_address: String,
}

/// Escape HTML-significant characters.
///
/// Mirrors the escaping applied to every stored free-text field: `&` first,
/// then `< > " ' / \``.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validate and sanitize the KYC form fields.
///
/// Each field is trimmed and must be non-empty; failures are collected per
/// field rather than short-circuiting, so the caller can report all of them
/// at once.
pub fn validate_kyc_fields(
    residential_address: Option<&str>,
    work_address: Option<&str>,
) -> Result<KycFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let residential = residential_address.map(str::trim).unwrap_or_default();
    if residential.is_empty() {
        errors.push(FieldError::new(
            "residential_address",
            "Residential address is required",
        ));
    }

    let work = work_address.map(str::trim).unwrap_or_default();
    if work.is_empty() {
        errors.push(FieldError::new("work_address", "Work address is required"));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(KycFields {
        residential_address: escape_text(residential),
        work_address: escape_text(work),
    })
}
