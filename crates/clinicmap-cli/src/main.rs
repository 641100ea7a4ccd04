mod geocode;
mod map;
mod search;

use clap::{Parser, Subcommand};
use clinicmap_search::SortKey;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clinicmap")]
#[command(about = "Clinic directory search, geocoding and map preview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search clinics by free text and region
    Search {
        /// Matches name, id, city, region or postal code
        #[arg(long, short, default_value = "")]
        query: String,
        /// Region code (e.g., TX), region slug (e.g., new-york) or "all"
        #[arg(long, short, default_value = "all")]
        region: String,
        /// name, volume, staffCount or branchCount
        #[arg(long, short, default_value = "name")]
        sort: SortKey,
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,
        /// Page size; defaults to CLINICMAP_PAGE_SIZE
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Geocode addresses, one output line per address
    Geocode {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Geocode a clinic's branches and print the map plan as JSON
    Map {
        /// Clinic slug; the closest name match is used
        slug: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = clinicmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            query,
            region,
            sort,
            page,
            per_page,
        } => {
            let per_page = per_page.unwrap_or(config.page_size);
            search::run_search(&config, &query, &region, sort, page, per_page)?;
        }
        Commands::Geocode { addresses } => geocode::run_geocode(&config, &addresses).await,
        Commands::Map { slug } => map::run_map(&config, &slug).await?,
    }

    Ok(())
}
