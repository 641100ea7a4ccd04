//! Free-text clinic search: filtering, ordering, best-match lookup and
//! pagination over an in-memory clinic list.

pub mod error;
pub mod facets;
pub mod matcher;
pub mod pagination;
pub mod similarity;
pub mod sort;

pub use error::SearchError;
pub use facets::{region_facets, RegionFacet};
pub use matcher::{match_clinics, matches_query, matches_region, ClinicQuery, RegionFilter};
pub use pagination::{paginate, Page, MAX_PER_PAGE};
pub use similarity::{find_best_match, score_name_match, BestMatch};
pub use sort::{sort_clinics, SortKey};
