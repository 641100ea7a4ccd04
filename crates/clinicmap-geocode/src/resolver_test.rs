use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clinicmap_core::{Coordinate, GeocoderConfig};

use super::*;

#[derive(Clone, Copy)]
enum Scripted {
    Found(f64, f64),
    Empty,
    Fail,
    Hang,
}

#[derive(Default)]
struct Calls {
    seen: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct FakeProvider {
    script: HashMap<String, Scripted>,
    calls: Arc<Calls>,
}

impl FakeProvider {
    fn new(script: &[(&str, Scripted)]) -> (Self, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let provider = Self {
            script: script
                .iter()
                .map(|(address, outcome)| ((*address).to_string(), *outcome))
                .collect(),
            calls: Arc::clone(&calls),
        };
        (provider, calls)
    }
}

impl GeocodeProvider for FakeProvider {
    async fn lookup(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.calls.seen.lock().unwrap().push(address.to_string());
        let now = self.calls.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;
        let outcome = self.script.get(address).copied().unwrap_or(Scripted::Empty);
        let result = match outcome {
            Scripted::Found(lat, lng) => Ok(Some(Coordinate::new(lat, lng))),
            Scripted::Empty => Ok(None),
            Scripted::Fail => Err(GeocodeError::RateLimited),
            Scripted::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(None)
            }
        };

        self.calls.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[tokio::test]
async fn failures_are_isolated_per_address() {
    let (provider, calls) = FakeProvider::new(&[
        ("Austin, TX 78701", Scripted::Found(30.27, -97.74)),
        ("Nowhere", Scripted::Fail),
        ("Reno, NV 89501", Scripted::Found(39.53, -119.81)),
    ]);
    let resolver = GeocodeResolver::new(provider);

    let results = resolver
        .resolve(&["Austin, TX 78701", "Nowhere", "Reno, NV 89501"])
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Some(Coordinate::new(30.27, -97.74)));
    assert_eq!(results[1], None);
    assert_eq!(results[2], Some(Coordinate::new(39.53, -119.81)));
    assert_eq!(calls.seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn requests_are_sequential_and_in_order() {
    let (provider, calls) = FakeProvider::new(&[]);
    let resolver = GeocodeResolver::new(provider);

    let addresses = ["a", "b", "c", "d"];
    let results = resolver.resolve(&addresses).await;

    assert_eq!(results, vec![None; 4]);
    assert_eq!(calls.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(*calls.seen.lock().unwrap(), ["a", "b", "c", "d"]);
}

#[tokio::test]
async fn blank_addresses_skip_the_provider() {
    let (provider, calls) = FakeProvider::new(&[("Reno", Scripted::Found(39.5, -119.8))]);
    let resolver = GeocodeResolver::new(provider);

    let results = resolver.resolve(&["", "   ", "Reno"]).await;

    assert_eq!(results, vec![None, None, Some(Coordinate::new(39.5, -119.8))]);
    assert_eq!(*calls.seen.lock().unwrap(), ["Reno"]);
}

#[tokio::test]
async fn hung_lookup_times_out_without_failing_the_batch() {
    let (provider, _calls) = FakeProvider::new(&[
        ("slow", Scripted::Hang),
        ("fast", Scripted::Found(1.0, 2.0)),
    ]);
    let resolver = GeocodeResolver::new(provider).with_request_timeout(Duration::from_millis(50));

    let results = resolver.resolve(&["slow", "fast"]).await;

    assert_eq!(results, vec![None, Some(Coordinate::new(1.0, 2.0))]);
}

#[tokio::test]
async fn delay_applies_between_issued_requests() {
    let (provider, _calls) = FakeProvider::new(&[]);
    let resolver =
        GeocodeResolver::new(provider).with_inter_request_delay(Duration::from_millis(40));

    let started = std::time::Instant::now();
    resolver.resolve(&["a", "b", "c"]).await;
    // two gaps between three requests
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn disabled_resolver_returns_all_none() {
    let resolver: GeocodeResolver<FakeProvider> = GeocodeResolver::disabled();
    assert!(!resolver.is_enabled());
    let results = resolver.resolve(&["Austin, TX 78701", "Reno, NV 89501"]).await;
    assert_eq!(results, vec![None, None]);
}

#[tokio::test]
async fn empty_batch_is_empty() {
    let (provider, calls) = FakeProvider::new(&[]);
    let resolver = GeocodeResolver::new(provider);
    let results = resolver.resolve::<&str>(&[]).await;
    assert!(results.is_empty());
    assert!(calls.seen.lock().unwrap().is_empty());
}

#[test]
fn from_config_without_token_is_disabled() {
    let config = GeocoderConfig {
        access_token: None,
        base_url: "https://api.mapbox.com".to_string(),
        country: "us".to_string(),
        request_timeout_secs: 10,
        inter_request_delay_ms: 100,
    };
    assert!(!GeocodeResolver::from_config(&config).is_enabled());
}

#[test]
fn from_config_with_token_is_enabled() {
    let config = GeocoderConfig {
        access_token: Some("pk.test".to_string()),
        base_url: "https://api.mapbox.com".to_string(),
        country: "us".to_string(),
        request_timeout_secs: 10,
        inter_request_delay_ms: 0,
    };
    assert!(GeocodeResolver::from_config(&config).is_enabled());
}
