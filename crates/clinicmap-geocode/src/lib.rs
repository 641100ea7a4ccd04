//! Address-to-coordinate resolution against an external geocoding provider.

pub mod client;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod types;

pub use client::MapboxClient;
pub use error::GeocodeError;
pub use provider::GeocodeProvider;
pub use resolver::GeocodeResolver;
