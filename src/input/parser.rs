//! Locale-independent number parsing for form fields

use crate::input::error::{InputError, InputResult};

/// Parse a decimal degree or depth field.
///
/// Accepts what `f64::from_str` accepts after trimming whitespace; the
/// decimal separator is always `.`. Non-finite results are rejected.
pub fn parse_decimal(field: &str, text: &str) -> InputResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed.parse().map_err(|_| InputError::Unparsable {
        field: field.to_string(),
        text: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::NonFinite {
            field: field.to_string(),
        });
    }
    Ok(value)
}
