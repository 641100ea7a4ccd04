use clinicmap_core::{Branch, Coordinate};
use serde::Serialize;

/// A branch paired with its geocoded coordinate, if one was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub branch: Branch,
    pub coordinate: Option<Coordinate>,
}

impl ResolvedLocation {
    /// Pairs branches with resolver output by position. Missing trailing
    /// coordinates count as unresolved.
    #[must_use]
    pub fn zip(branches: &[Branch], coordinates: &[Option<Coordinate>]) -> Vec<Self> {
        branches
            .iter()
            .enumerate()
            .map(|(i, branch)| Self {
                branch: branch.clone(),
                coordinate: coordinates.get(i).copied().flatten(),
            })
            .collect()
    }
}

/// Text shown in a marker's popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerContent {
    pub title: String,
    pub street: Option<String>,
    pub locality: String,
    pub phone: Option<String>,
}

impl From<&Branch> for MarkerContent {
    fn from(branch: &Branch) -> Self {
        Self {
            title: branch.name.clone(),
            street: branch.street.clone(),
            locality: branch.locality.clone(),
            phone: branch.phone.clone(),
        }
    }
}
