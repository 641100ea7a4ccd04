use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use clinicmap_core::{slugify, Clinic};
use clinicmap_search::{find_best_match, match_clinics, paginate, Page, RegionFilter, SortKey};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ClinicListQuery {
    pub q: Option<String>,
    /// Region code, region slug (`new-york`) or `all`.
    pub region: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct ClinicSummaryItem {
    id: i64,
    slug: String,
    name: String,
    cities: Vec<String>,
    regions: Vec<String>,
    branch_count: usize,
    staff_count: usize,
    annual_volume: Option<String>,
}

impl From<&Clinic> for ClinicSummaryItem {
    fn from(clinic: &Clinic) -> Self {
        let cities: BTreeSet<String> = clinic
            .branches
            .iter()
            .map(clinicmap_core::Branch::city)
            .filter(|c| !c.is_empty())
            .collect();
        let regions: BTreeSet<String> = clinic
            .branches
            .iter()
            .filter_map(clinicmap_core::Branch::region_code)
            .collect();
        Self {
            id: clinic.id,
            slug: clinic.slug.clone(),
            name: clinic.name.clone(),
            cities: cities.into_iter().collect(),
            regions: regions.into_iter().collect(),
            branch_count: clinic.branch_count(),
            staff_count: clinic.staff_count(),
            annual_volume: clinic.metrics.volume.value.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ClinicDetailItem {
    #[serde(flatten)]
    clinic: Clinic,
    /// Similarity of the requested slug to this clinic; 100 for an exact hit.
    match_score: f64,
}

pub(super) async fn list_clinics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ClinicListQuery>,
) -> Result<Json<ApiResponse<Page<ClinicSummaryItem>>>, ApiError> {
    let sort = match query.sort.as_deref().map(str::trim) {
        None | Some("") => SortKey::default(),
        Some(raw) => raw
            .parse::<SortKey>()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
    };
    let region = RegionFilter::from_user_input(query.region.as_deref().unwrap_or_default());
    let text = query.q.unwrap_or_default();

    let matched = match_clinics(&state.clinics, &text, &region, sort);
    let page = paginate(
        &matched,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(state.page_size),
    )
    .map(ClinicSummaryItem::from);

    Ok(Json(ApiResponse::new(page, req_id.0)))
}

pub(super) async fn get_clinic(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ClinicDetailItem>>, ApiError> {
    let found = find_best_match(&state.clinics, &slugify(&slug)).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "not_found",
            format!("no clinic matches '{slug}'"),
        )
    })?;

    Ok(Json(ApiResponse::new(
        ClinicDetailItem {
            clinic: found.clinic.clone(),
            match_score: found.score,
        },
        req_id.0,
    )))
}
