//! Batch address resolution with per-address failure isolation.

use std::time::Duration;

use clinicmap_core::{Coordinate, GeocoderConfig};

use crate::client::MapboxClient;
use crate::error::GeocodeError;
use crate::provider::GeocodeProvider;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a batch of addresses one at a time.
///
/// Lookups are issued strictly sequentially, with an optional pause between
/// requests. Any failure (transport, status, parse, timeout) is logged and
/// recorded as `None` for that address only; the batch always completes.
pub struct GeocodeResolver<P> {
    provider: Option<P>,
    request_timeout: Duration,
    inter_request_delay: Duration,
}

impl<P: GeocodeProvider> GeocodeResolver<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider: Some(provider),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            inter_request_delay: Duration::ZERO,
        }
    }

    /// A resolver with no provider. Every address resolves to `None` and
    /// no request is made.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            provider: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            inter_request_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_inter_request_delay(mut self, delay: Duration) -> Self {
        self.inter_request_delay = delay;
        self
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Resolves `addresses` in order. The output has the same length and
    /// order as the input.
    ///
    /// Blank addresses resolve to `None` without a request. The inter-request
    /// delay is only applied between requests that are actually issued.
    pub async fn resolve<S: AsRef<str>>(&self, addresses: &[S]) -> Vec<Option<Coordinate>> {
        let Some(provider) = &self.provider else {
            tracing::info!(
                count = addresses.len(),
                "geocoding disabled: no credential configured"
            );
            return vec![None; addresses.len()];
        };

        let mut results = Vec::with_capacity(addresses.len());
        let mut issued = 0usize;

        for (index, address) in addresses.iter().enumerate() {
            let address = address.as_ref().trim();
            if address.is_empty() {
                results.push(None);
                continue;
            }

            if issued > 0 && !self.inter_request_delay.is_zero() {
                tokio::time::sleep(self.inter_request_delay).await;
            }
            issued += 1;

            let outcome = tokio::time::timeout(self.request_timeout, provider.lookup(address))
                .await
                .unwrap_or_else(|_| {
                    Err(GeocodeError::Timeout {
                        timeout_ms: self.request_timeout.as_millis(),
                    })
                });

            match outcome {
                Ok(Some(coordinate)) => {
                    tracing::debug!(
                        index,
                        address,
                        lat = coordinate.lat,
                        lng = coordinate.lng,
                        "geocoded"
                    );
                    results.push(Some(coordinate));
                }
                Ok(None) => {
                    tracing::debug!(index, address, "geocoder returned no candidates");
                    results.push(None);
                }
                Err(e) => {
                    tracing::warn!(index, address, error = %e, "geocoding failed");
                    results.push(None);
                }
            }
        }

        results
    }
}

impl GeocodeResolver<MapboxClient> {
    /// Builds a resolver from configuration. A missing credential, or a
    /// client that cannot be built, yields a disabled resolver.
    #[must_use]
    pub fn from_config(config: &GeocoderConfig) -> Self {
        let resolver = match MapboxClient::from_config(config) {
            Ok(Some(client)) => Self::new(client),
            Ok(None) => Self::disabled(),
            Err(e) => {
                tracing::warn!(error = %e, "geocoder client unavailable; geocoding disabled");
                Self::disabled()
            }
        };
        resolver
            .with_request_timeout(Duration::from_secs(config.request_timeout_secs))
            .with_inter_request_delay(Duration::from_millis(config.inter_request_delay_ms))
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
