use thiserror::Error;

use crate::surface::{MarkerId, PopupId};

/// Failures reported by a [`crate::MapSurface`] primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("map surface unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("unknown marker {0}")]
    UnknownMarker(MarkerId),

    #[error("unknown popup {0}")]
    UnknownPopup(PopupId),

    #[error("map surface rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },
}

/// The only map failure that reaches the caller. It ends the map render and
/// the caller shows the location list.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map unavailable: {0}")]
    SurfaceUnavailable(#[source] SurfaceError),
}
