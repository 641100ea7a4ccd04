use serde::{Deserialize, Serialize};

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate from a provider's `[lng, lat]` pair.
    ///
    /// Returns `None` when either component is non-finite or out of range.
    #[must_use]
    pub fn from_lng_lat(pair: [f64; 2]) -> Option<Self> {
        let [lng, lat] = pair;
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lng_lat_swaps_order() {
        let c = Coordinate::from_lng_lat([-97.7431, 30.2672]).unwrap();
        assert!((c.lat - 30.2672).abs() < 1e-9);
        assert!((c.lng - (-97.7431)).abs() < 1e-9);
    }

    #[test]
    fn from_lng_lat_rejects_out_of_range() {
        assert!(Coordinate::from_lng_lat([0.0, 91.0]).is_none());
        assert!(Coordinate::from_lng_lat([181.0, 0.0]).is_none());
        assert!(Coordinate::from_lng_lat([f64::NAN, 0.0]).is_none());
    }
}
