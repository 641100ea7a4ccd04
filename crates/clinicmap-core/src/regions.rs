//! US state / district code table.
//!
//! Lookups are total: unknown input is passed through rather than rejected,
//! because locality strings come from upstream data of uneven quality.

/// `(code, full name)` for the 50 states plus DC, ordered by code.
pub const REGIONS: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// Full name for a two-letter code. Unknown codes are returned unchanged.
#[must_use]
pub fn region_full_name(code: &str) -> String {
    REGIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| code.to_string(), |(_, name)| (*name).to_string())
}

/// Reverse lookup from a hyphenated region name (`"new-york"`) or a plain
/// name (`"New York"`) to its code.
///
/// Input that names no known region is upper-cased and returned as if it
/// were already a code.
#[must_use]
pub fn region_code_from_slug(slug_or_name: &str) -> String {
    let wanted = slug_or_name.trim().replace('-', " ").to_lowercase();
    REGIONS
        .iter()
        .find(|(_, name)| name.to_lowercase() == wanted)
        .map_or_else(
            || slug_or_name.trim().to_uppercase(),
            |(code, _)| (*code).to_string(),
        )
}

/// URL slug for a region code (`"NY"` -> `"new-york"`).
///
/// Unknown codes are lower-cased so the result still round-trips through
/// [`region_code_from_slug`].
#[must_use]
pub fn region_slug(code: &str) -> String {
    region_full_name(code).to_lowercase().replace(' ', "-")
}
