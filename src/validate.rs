use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::EMAIL_SEPARATOR;
use crate::error::{MergeError, Result};
use crate::types::MergeFields;

static EMAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@;,]+@[^\s@;,]+\.[^\s@;,.]+$").expect("email pattern is valid")
});

pub fn is_valid_address(address: &str) -> bool {
    EMAIL_ADDRESS.is_match(address)
}

/// Checks a semicolon-separated address list. Blank is accepted.
pub fn validate_address_list(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    for address in value.split(EMAIL_SEPARATOR).map(str::trim) {
        if !is_valid_address(address) {
            return Err(MergeError::InvalidAddress {
                field: field.to_string(),
                value: address.to_string(),
            });
        }
    }
    Ok(())
}

/// Caller-side checks on the per-run fields; subject and attachment are free-form.
pub fn validate_fields(fields: &MergeFields) -> Result<()> {
    validate_address_list("send_as", &fields.send_as)?;
    validate_address_list("cc", &fields.cc)?;
    validate_address_list("bcc", &fields.bcc)?;
    Ok(())
}
