use std::cmp::Ordering;
use std::str::FromStr;

use clinicmap_core::{parse_metric_number, Clinic};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::SearchError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Ascending by display name.
    #[default]
    Name,
    /// Descending by annual volume; unparseable volumes count as zero.
    Volume,
    /// Descending by number of doctors.
    StaffCount,
    /// Descending by number of branches.
    BranchCount,
}

impl FromStr for SortKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "volume" => Ok(Self::Volume),
            "staffCount" | "staff_count" | "staff" => Ok(Self::StaffCount),
            "branchCount" | "branch_count" | "branches" => Ok(Self::BranchCount),
            other => Err(SearchError::UnknownSortKey(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Volume => write!(f, "volume"),
            SortKey::StaffCount => write!(f, "staffCount"),
            SortKey::BranchCount => write!(f, "branchCount"),
        }
    }
}

/// Volume used for ordering. `"N/A"`, blanks and non-numeric strings are 0.
fn volume_of(clinic: &Clinic) -> f64 {
    clinic
        .metrics
        .volume
        .value
        .as_deref()
        .and_then(parse_metric_number)
        .unwrap_or(0.0)
}

/// Collation key: decomposed, accents dropped, lowercased. `"Émile"` keys as
/// `"emile"` so it sorts with the other `e` names.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares on the collation key; the raw name breaks ties so the order is
/// total.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Sorts in place. The sort is stable; equal keys keep their input order.
pub fn sort_clinics(clinics: &mut [&Clinic], key: SortKey) {
    match key {
        SortKey::Name => clinics.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Volume => clinics.sort_by(|a, b| volume_of(b).total_cmp(&volume_of(a))),
        SortKey::StaffCount => clinics.sort_by_key(|c| std::cmp::Reverse(c.staff_count())),
        SortKey::BranchCount => clinics.sort_by_key(|c| std::cmp::Reverse(c.branch_count())),
    }
}
