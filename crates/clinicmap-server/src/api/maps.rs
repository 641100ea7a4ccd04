use axum::{
    extract::{Path, State},
    Extension, Json,
};
use clinicmap_core::slugify;
use clinicmap_map::{MapCommand, MapRender, MapSession, RecordingSurface};
use clinicmap_search::find_best_match;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ClinicMapItem {
    clinic_slug: String,
    geocoder: &'static str,
    render: MapRender,
    /// Surface commands a client-side renderer replays in order.
    commands: Vec<MapCommand>,
}

pub(super) async fn get_clinic_map(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ClinicMapItem>>, ApiError> {
    let found = find_best_match(&state.clinics, &slugify(&slug)).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "not_found",
            format!("no clinic matches '{slug}'"),
        )
    })?;
    let clinic = found.clinic;
    let geocoder = if state.resolver.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    let mut session = MapSession::new(RecordingSurface::new());

    let ticket = session.begin(&clinic.branches);
    let coordinates = state.resolver.resolve(&ticket.addresses).await;
    let outcome = session.complete(ticket.generation, &coordinates);
    tracing::debug!(clinic = %clinic.slug, ?outcome, "clinic map built");

    let render = session.render();
    let commands = session.surface_mut().take_commands();

    Ok(Json(ApiResponse::new(
        ClinicMapItem {
            clinic_slug: clinic.slug.clone(),
            geocoder,
            render,
            commands,
        },
        req_id.0,
    )))
}
