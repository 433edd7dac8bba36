//! Input validation helpers
//!
//! Centralized text length constants and validation functions for draft
//! fields. Each helper reports a [`DraftViolation`] so that callers can
//! collect every problem in one pass.

use crate::core::DraftViolation;

// ── Text length limits ──────────────────────────────────────────────

/// Names: parcel title, sender / receiver name
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers, region and center ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Pickup / delivery instructions
pub const MAX_NOTE_LEN: usize = 500;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), DraftViolation> {
    if value.trim().is_empty() {
        return Err(DraftViolation::new(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(DraftViolation::new(
            field,
            format!("is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Loose email shape check: one `@` with text on both sides.
pub fn validate_email(value: &str, field: &'static str) -> Result<(), DraftViolation> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(DraftViolation::new(field, "is not a valid email address")),
    }
}
