pub mod app_config;
pub mod clinics;
pub mod config;
pub mod geo;
pub mod locality;
pub mod metrics;
pub mod regions;

pub use app_config::{AppConfig, Environment, GeocoderConfig};
pub use clinics::{load_clinics, slugify, Branch, Clinic, ClinicsFile, StaffMember};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::Coordinate;
pub use locality::{extract_city_name, extract_postal_code, extract_region_code};
pub use metrics::{parse_metric_number, ClinicMetrics, Metric, SuccessRate};
pub use regions::{region_code_from_slug, region_full_name, region_slug, REGIONS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read clinics file {path}: {source}")]
    ClinicsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse clinics file {path}: {reason}")]
    ClinicsFileParse { path: String, reason: String },

    #[error("clinic data validation failed: {0}")]
    Validation(String),
}
