//! Map framing and marker lifecycle for a clinic's branch locations.
//!
//! [`compute_viewport`] frames a set of resolved coordinates,
//! [`MarkerController`] owns the markers and the single open popup on a
//! [`MapSurface`], and [`MapSession`] ties both to a generation counter so
//! results for a superseded location set are dropped.

pub mod bounds;
pub mod controller;
pub mod error;
pub mod location;
pub mod session;
pub mod surface;

pub use bounds::{compute_viewport, BoundingBox, Viewport};
pub use controller::{MapEvent, MarkerController};
pub use error::{MapError, SurfaceError};
pub use location::{MarkerContent, ResolvedLocation};
pub use session::{
    FallbackReason, Generation, LoadOutcome, LoadTicket, MapRender, MapSession, PlacedMarker,
};
pub use surface::{MapCommand, MapSurface, MarkerId, PopupId, RecordingSurface};
