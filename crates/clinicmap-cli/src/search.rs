//! `search` command: filter, sort and page the clinic list.

use clinicmap_core::{AppConfig, Clinic};
use clinicmap_search::{match_clinics, paginate, RegionFilter, SortKey};

/// One output row: id, name, then distinct region codes.
pub(crate) fn format_row(clinic: &Clinic) -> String {
    let mut regions: Vec<String> = clinic
        .branches
        .iter()
        .filter_map(clinicmap_core::Branch::region_code)
        .collect();
    regions.sort();
    regions.dedup();
    let regions = if regions.is_empty() {
        "-".to_string()
    } else {
        regions.join(",")
    };
    format!(
        "{:>6}  {:<40}  {:>3} branches  {}",
        clinic.id,
        clinic.name,
        clinic.branch_count(),
        regions
    )
}

/// Loads the clinic file and prints one page of matches.
///
/// # Errors
///
/// Returns an error if the clinic data file cannot be loaded.
pub(crate) fn run_search(
    config: &AppConfig,
    query: &str,
    region: &str,
    sort: SortKey,
    page: usize,
    per_page: usize,
) -> anyhow::Result<()> {
    let data = clinicmap_core::load_clinics(&config.clinics_path)?;
    let matched = match_clinics(
        &data.clinics,
        query,
        &RegionFilter::from_user_input(region),
        sort,
    );
    let page = paginate(&matched, page, per_page);

    for clinic in &page.items {
        println!("{}", format_row(clinic));
    }
    println!(
        "page {}/{} ({} matching, sorted by {sort})",
        page.page, page.total_pages, page.total_items
    );
    Ok(())
}
