use std::collections::{BTreeMap, BTreeSet};

use clinicmap_core::{region_full_name, region_slug, Clinic};
use serde::Serialize;

/// A region option for the listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionFacet {
    pub code: String,
    pub name: String,
    pub slug: String,
    /// Clinics with at least one branch in this region.
    pub clinic_count: usize,
}

/// Distinct region codes across all branches, sorted by full name.
///
/// A clinic with several branches in one region is counted once for it.
#[must_use]
pub fn region_facets(clinics: &[Clinic]) -> Vec<RegionFacet> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for clinic in clinics {
        let codes: BTreeSet<String> = clinic
            .branches
            .iter()
            .filter_map(clinicmap_core::Branch::region_code)
            .collect();
        for code in codes {
            *counts.entry(code).or_default() += 1;
        }
    }

    let mut facets: Vec<RegionFacet> = counts
        .into_iter()
        .map(|(code, clinic_count)| RegionFacet {
            name: region_full_name(&code),
            slug: region_slug(&code),
            code,
            clinic_count,
        })
        .collect();
    facets.sort_by(|a, b| a.name.cmp(&b.name));
    facets
}
