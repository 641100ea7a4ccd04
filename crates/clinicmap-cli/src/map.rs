//! `map` command: build the map plan for one clinic and print it as JSON.

use anyhow::Context;
use clinicmap_core::{slugify, AppConfig};
use clinicmap_geocode::GeocodeResolver;
use clinicmap_map::{LoadOutcome, MapCommand, MapRender, MapSession, RecordingSurface};
use clinicmap_search::find_best_match;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MapPlan<'a> {
    clinic: &'a str,
    match_score: f64,
    render: MapRender,
    commands: Vec<MapCommand>,
}

/// # Errors
///
/// Returns an error if the clinic file cannot be loaded or no clinic matches
/// `slug`.
pub(crate) async fn run_map(config: &AppConfig, slug: &str) -> anyhow::Result<()> {
    let data = clinicmap_core::load_clinics(&config.clinics_path)?;
    let found = find_best_match(&data.clinics, &slugify(slug))
        .with_context(|| format!("no clinic matches '{slug}'"))?;
    let clinic = found.clinic;

    let resolver = GeocodeResolver::from_config(&config.geocoder);
    let mut session = MapSession::new(RecordingSurface::new());
    let ticket = session.begin(&clinic.branches);
    let coordinates = resolver.resolve(&ticket.addresses).await;

    if let LoadOutcome::Applied { markers, .. } = session.complete(ticket.generation, &coordinates)
    {
        tracing::info!(clinic = %clinic.slug, markers, "map plan built");
    }

    let plan = MapPlan {
        clinic: &clinic.slug,
        match_score: found.score,
        render: session.render(),
        commands: session.surface_mut().take_commands(),
    };
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
