//! Resource-name and retention-duration validation.
//!
//! Validation runs before any network call; a failure produces no traffic.

use once_cell::sync::Lazy;
use regex::Regex;
use unisphere_domain::ValidationError;

/// Maximum name length for most resources.
pub const MAX_RESOURCE_NAME_LEN: usize = 63;
/// Consistency groups allow longer names.
pub const MAX_CONSISTENCY_GROUP_NAME_LEN: usize = 95;

/// First character alphabetic, the rest alphanumeric plus `_`, `-`, `:`.
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9:_-]*$").expect("NAME_REGEX pattern is valid and well-formed")
});

/// Trim and validate a resource name against the array's naming rules.
///
/// Returns the normalized (trimmed) name. Idempotent: validating the
/// returned value yields it unchanged.
pub fn validate_resource_name(name: &str, max_len: usize) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if name.len() > max_len {
        return Err(ValidationError::NameTooLong { len: name.len(), max: max_len });
    }
    if !NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }
    Ok(name.to_string())
}

/// Parse a `D:H:M:S` retention duration into seconds.
///
/// An empty string means "no retention override" and yields 0.
pub fn parse_retention_duration(duration: &str) -> Result<u64, ValidationError> {
    if duration.is_empty() {
        return Ok(0);
    }

    let fields: Vec<&str> = duration.split(':').collect();
    if fields.len() != 4 {
        return Err(ValidationError::InvalidDuration(format!(
            "'{duration}' must have exactly four ':'-separated fields (days:hours:minutes:seconds)"
        )));
    }

    let days = parse_field(duration, fields[0], "days", u64::MAX)?;
    let hours = parse_field(duration, fields[1], "hours", 23)?;
    let minutes = parse_field(duration, fields[2], "minutes", 59)?;
    let seconds = parse_field(duration, fields[3], "seconds", 59)?;

    // Hours/minutes/seconds are range-checked above; only days can overflow.
    days.checked_mul(86_400)
        .and_then(|total| total.checked_add(hours * 3_600 + minutes * 60 + seconds))
        .ok_or_else(|| {
            ValidationError::InvalidDuration(format!(
                "'{duration}': days field is too large to express in seconds"
            ))
        })
}

fn parse_field(
    duration: &str,
    field: &str,
    name: &'static str,
    max: u64,
) -> Result<u64, ValidationError> {
    let value: u64 = field.parse().map_err(|_| {
        ValidationError::InvalidDuration(format!(
            "'{duration}': {name} field '{field}' is not a non-negative integer"
        ))
    })?;
    if value > max {
        return Err(ValidationError::InvalidDuration(format!(
            "'{duration}': {name} field must be at most {max}, got {value}"
        )));
    }
    Ok(value)
}

/// Reject empty or whitespace-only identifiers before building a URI.
pub(crate) fn require_id<'a>(
    value: &'a str,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}
