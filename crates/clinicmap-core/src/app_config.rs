use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for the external geocoding provider.
#[derive(Clone)]
pub struct GeocoderConfig {
    /// Provider credential. `None` disables geocoding entirely.
    pub access_token: Option<String>,
    pub base_url: String,
    /// Country restriction passed with every lookup (ISO 3166-1 alpha-2).
    pub country: String,
    pub request_timeout_secs: u64,
    /// Pause between sequential lookups in one batch.
    pub inter_request_delay_ms: u64,
}

impl std::fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("base_url", &self.base_url)
            .field("country", &self.country)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub clinics_path: PathBuf,
    pub page_size: usize,
    pub geocoder: GeocoderConfig,
}
