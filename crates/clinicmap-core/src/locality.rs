//! Parsing of the combined `"City, ST 12345"` locality field.
//!
//! The field is free text. Every function here is total: a string that does
//! not carry the region/postal pattern yields `None`, never an error.

use std::sync::LazyLock;

use regex::Regex;

/// Comma, optional whitespace, two uppercase letters, whitespace, five digits.
/// The pair may appear anywhere after a comma, not only at the end.
static REGION_POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([A-Z]{2})\s+(\d{5})\b").expect("valid regex"));

/// Two-letter region code from a locality string, if the pattern is present.
///
/// ```
/// use clinicmap_core::extract_region_code;
/// assert_eq!(extract_region_code("Austin, TX 78701").as_deref(), Some("TX"));
/// assert_eq!(extract_region_code("Austin Texas"), None);
/// ```
#[must_use]
pub fn extract_region_code(locality: &str) -> Option<String> {
    REGION_POSTAL_RE
        .captures(locality)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Five-digit postal code paired with the region code, if present.
#[must_use]
pub fn extract_postal_code(locality: &str) -> Option<String> {
    REGION_POSTAL_RE
        .captures(locality)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Text before the first comma, trimmed. Without a comma the whole field is
/// treated as the city.
#[must_use]
pub fn extract_city_name(locality: &str) -> String {
    locality
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
