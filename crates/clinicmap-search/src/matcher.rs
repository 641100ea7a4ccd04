//! Clinic filtering by free text and region.
//!
//! Both predicates are pure; [`match_clinics`] combines them with AND and
//! then orders the survivors by a [`SortKey`].

use std::convert::Infallible;
use std::str::FromStr;

use clinicmap_core::{region_code_from_slug, region_full_name, Branch, Clinic};
use serde::{Deserialize, Serialize};

use crate::sort::{sort_clinics, SortKey};

/// Region restriction. `"all"` (any case) disables filtering; anything else
/// is compared verbatim against each branch's parsed region code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Code(String),
}

impl RegionFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Code(trimmed.to_string())
        }
    }

    /// Like [`RegionFilter::parse`], but full names and slugs
    /// (`"new-york"`, `"Nevada"`) are mapped to their code first.
    #[must_use]
    pub fn from_user_input(raw: &str) -> Self {
        match Self::parse(raw) {
            Self::All => Self::All,
            Self::Code(value) => Self::Code(region_code_from_slug(&value)),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for RegionFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RegionFilter> for String {
    fn from(value: RegionFilter) -> Self {
        match value {
            RegionFilter::All => "all".to_string(),
            RegionFilter::Code(code) => code,
        }
    }
}

/// A complete listing request: text, region and ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClinicQuery {
    pub text: String,
    pub region: RegionFilter,
    pub sort: SortKey,
}

impl ClinicQuery {
    #[must_use]
    pub fn apply<'a>(&self, clinics: &'a [Clinic]) -> Vec<&'a Clinic> {
        match_clinics(clinics, &self.text, &self.region, self.sort)
    }
}

fn branch_matches(branch: &Branch, needle: &str) -> bool {
    if branch.city().to_lowercase().contains(needle) {
        return true;
    }
    if let Some(code) = branch.region_code() {
        if code.to_lowercase().contains(needle)
            || region_full_name(&code).to_lowercase().contains(needle)
        {
            return true;
        }
    }
    // Raw field last: covers postal-code searches.
    branch.locality.to_lowercase().contains(needle)
}

/// Case-insensitive text match. An empty (or all-whitespace) query matches
/// every clinic.
///
/// The clinic-level checks (name, numeric id) run before any branch is
/// parsed.
#[must_use]
pub fn matches_query(clinic: &Clinic, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    if clinic.name.to_lowercase().contains(&needle) || clinic.id.to_string().contains(&needle) {
        return true;
    }
    clinic.branches.iter().any(|b| branch_matches(b, &needle))
}

/// True when any branch's parsed region code equals the filter code
/// exactly. Branches without a parseable code never satisfy a code filter.
#[must_use]
pub fn matches_region(clinic: &Clinic, filter: &RegionFilter) -> bool {
    match filter {
        RegionFilter::All => true,
        RegionFilter::Code(code) => clinic
            .branches
            .iter()
            .any(|b| b.region_code().as_deref() == Some(code.as_str())),
    }
}

/// Filters `clinics` by text AND region, then sorts by `sort`.
#[must_use]
pub fn match_clinics<'a>(
    clinics: &'a [Clinic],
    query: &str,
    region: &RegionFilter,
    sort: SortKey,
) -> Vec<&'a Clinic> {
    let mut matched: Vec<&Clinic> = clinics
        .iter()
        .filter(|c| matches_query(c, query) && matches_region(c, region))
        .collect();
    sort_clinics(&mut matched, sort);
    tracing::debug!(
        query,
        region = ?region,
        %sort,
        total = clinics.len(),
        matched = matched.len(),
        "clinic search"
    );
    matched
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
