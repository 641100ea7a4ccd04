use std::future::Future;

use clinicmap_core::Coordinate;

use crate::error::GeocodeError;

/// A forward geocoding backend.
///
/// `Ok(None)` means the provider answered but had no candidate for the
/// address; `Err` means the lookup itself failed.
pub trait GeocodeProvider {
    fn lookup(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send;
}
