use axum::{extract::State, Extension, Json};
use clinicmap_search::{region_facets, RegionFacet};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

pub(super) async fn list_regions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<RegionFacet>>> {
    Json(ApiResponse::new(region_facets(&state.clinics), req_id.0))
}
