//! Field validators for the entity dialogs. Each returns the message to show,
//! or None when the value is acceptable.

use crate::models::common::parse_date;

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str, field_name: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.len() > 254 {
        return Some(format!("{field_name} must be at most 254 characters"));
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => None,
        _ => Some(format!("{field_name} must be a valid address")),
    }
}

/// Validate an http(s) URL. Empty is accepted unless `required`.
pub fn validate_url(url: &str, field_name: &str, required: bool) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return required.then(|| format!("{field_name} is required"));
    }
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => None,
        _ => Some(format!("{field_name} must be a valid http(s) URL")),
    }
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Parse a non-negative whole number. Empty reads as 0.
pub fn parse_count(value: &str, field_name: &str) -> Result<u32, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| format!("{field_name} must be a whole number of 0 or more"))
}

pub fn validate_date(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    match parse_date(trimmed) {
        Some(_) => None,
        None => Some(format!("{field_name} must be a date (YYYY-MM-DD)")),
    }
}
