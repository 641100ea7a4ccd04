//! HTTP client for the Mapbox forward-geocoding (`mapbox.places`) endpoint.
//!
//! Wraps `reqwest` with credential handling, a country restriction, and
//! typed status handling. Use [`MapboxClient::with_base_url`] to point at a
//! mock server in tests.

use std::time::Duration;

use clinicmap_core::{Coordinate, GeocoderConfig};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode, Url};

use crate::error::GeocodeError;
use crate::provider::GeocodeProvider;
use crate::types::FeatureCollection;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";
const PLACES_PATH: &str = "geocoding/v5/mapbox.places";

pub struct MapboxClient {
    client: Client,
    access_token: String,
    country: String,
    base_url: Url,
}

impl MapboxClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: &str, country: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(access_token, country, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        country: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent("clinicmap/0.1 (clinic-directory)")
            .build()?;

        // Exactly one trailing slash so the places path is appended rather
        // than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            country: country.to_lowercase(),
            base_url,
        })
    }

    /// Builds a client from configuration. Returns `Ok(None)` when no
    /// credential is configured.
    ///
    /// # Errors
    ///
    /// Same as [`MapboxClient::with_base_url`].
    pub fn from_config(config: &GeocoderConfig) -> Result<Option<Self>, GeocodeError> {
        config
            .access_token
            .as_deref()
            .map(|token| {
                Self::with_base_url(
                    token,
                    &config.country,
                    config.request_timeout_secs,
                    &config.base_url,
                )
            })
            .transpose()
    }

    /// Full request URL: the address is percent-encoded into the path and
    /// the credential, country and result limit go in the query string.
    fn build_url(&self, address: &str) -> Result<Url, GeocodeError> {
        let encoded = utf8_percent_encode(address, NON_ALPHANUMERIC);
        let raw = format!("{}{PLACES_PATH}/{encoded}.json", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: self.base_url.to_string(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("country", &self.country)
            .append_pair("limit", "1");
        Ok(url)
    }

    /// Looks up one address and returns the first candidate's coordinate.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Unauthorized`] on HTTP 401/403.
    /// - [`GeocodeError::RateLimited`] on HTTP 429.
    /// - [`GeocodeError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::Deserialize`] if the body is not a feature collection.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = self.build_url(address)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GeocodeError::Unauthorized {
                    status: status.as_u16(),
                });
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(GeocodeError::RateLimited),
            s if !s.is_success() => {
                return Err(GeocodeError::UnexpectedStatus {
                    status: s.as_u16(),
                    address: address.to_string(),
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        // Candidates are ranked; only the first is used.
        Ok(collection
            .features
            .first()
            .and_then(|f| Coordinate::from_lng_lat(f.center)))
    }
}

impl GeocodeProvider for MapboxClient {
    async fn lookup(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.geocode(address).await
    }
}
