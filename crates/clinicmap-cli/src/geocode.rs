//! `geocode` command: resolve addresses through the configured provider.

use clinicmap_core::{AppConfig, Coordinate};
use clinicmap_geocode::GeocodeResolver;

/// `lat,lng` with six decimals, or `-` when unresolved.
pub(crate) fn format_coordinate(coordinate: Option<Coordinate>) -> String {
    coordinate.map_or_else(
        || "-".to_string(),
        |c| format!("{:.6},{:.6}", c.lat, c.lng),
    )
}

/// Prints one line per address in input order. Never fails: unresolved
/// addresses print `-`.
pub(crate) async fn run_geocode(config: &AppConfig, addresses: &[String]) {
    let resolver = GeocodeResolver::from_config(&config.geocoder);
    if !resolver.is_enabled() {
        eprintln!("MAPBOX_ACCESS_TOKEN is not set; every address will be unresolved");
    }
    for coordinate in resolver.resolve(addresses).await {
        println!("{}", format_coordinate(coordinate));
    }
}
