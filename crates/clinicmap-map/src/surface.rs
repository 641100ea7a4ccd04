//! The map rendering surface boundary and an in-memory recording surface.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use clinicmap_core::Coordinate;
use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::error::SurfaceError;
use crate::location::MarkerContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PopupId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popup#{}", self.0)
    }
}

/// Primitives exposed by an interactive map.
///
/// Click events are not pulled from the surface; whoever owns the event
/// loop forwards them to [`crate::MarkerController::handle_event`].
pub trait MapSurface {
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the marker cannot be placed.
    fn add_marker(&mut self, at: Coordinate, content: &MarkerContent)
        -> Result<MarkerId, SurfaceError>;

    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownMarker`] if `id` is not on the map.
    fn remove_marker(&mut self, id: MarkerId) -> Result<(), SurfaceError>;

    /// Attaches a popup at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the popup cannot be attached.
    fn add_popup(&mut self, at: Coordinate, content: &MarkerContent)
        -> Result<PopupId, SurfaceError>;

    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownPopup`] if `id` is not attached.
    fn remove_popup(&mut self, id: PopupId) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the view cannot be changed.
    fn fit_bounds(
        &mut self,
        bounds: &BoundingBox,
        padding: u32,
        max_zoom: f64,
    ) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the view cannot be changed.
    fn set_view(&mut self, center: Coordinate, zoom: f64) -> Result<(), SurfaceError>;
}

/// One primitive call against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    AddMarker {
        id: MarkerId,
        at: Coordinate,
        title: String,
    },
    RemoveMarker {
        id: MarkerId,
    },
    AddPopup {
        id: PopupId,
        at: Coordinate,
        content: MarkerContent,
    },
    RemovePopup {
        id: PopupId,
    },
    FitBounds {
        bounds: BoundingBox,
        padding: u32,
        max_zoom: f64,
    },
    SetView {
        center: Coordinate,
        zoom: f64,
    },
}

/// A headless surface that tracks live markers and popups and logs every
/// command. The log is what the API hands to a client-side renderer.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    markers: BTreeMap<MarkerId, Coordinate>,
    popups: BTreeSet<PopupId>,
    commands: Vec<MapCommand>,
    marker_limit: Option<usize>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects `add_marker` once `limit` markers are live.
    #[must_use]
    pub fn with_marker_limit(mut self, limit: usize) -> Self {
        self.marker_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }

    #[must_use]
    pub fn take_commands(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn live_markers(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn attached_popups(&self) -> usize {
        self.popups.len()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(
        &mut self,
        at: Coordinate,
        content: &MarkerContent,
    ) -> Result<MarkerId, SurfaceError> {
        if self.marker_limit.is_some_and(|limit| self.markers.len() >= limit) {
            return Err(SurfaceError::Rejected {
                operation: "add_marker".to_string(),
                reason: "marker limit reached".to_string(),
            });
        }
        let id = MarkerId(self.next());
        self.markers.insert(id, at);
        self.commands.push(MapCommand::AddMarker {
            id,
            at,
            title: content.title.clone(),
        });
        Ok(id)
    }

    fn remove_marker(&mut self, id: MarkerId) -> Result<(), SurfaceError> {
        self.markers
            .remove(&id)
            .ok_or(SurfaceError::UnknownMarker(id))?;
        self.commands.push(MapCommand::RemoveMarker { id });
        Ok(())
    }

    fn add_popup(
        &mut self,
        at: Coordinate,
        content: &MarkerContent,
    ) -> Result<PopupId, SurfaceError> {
        let id = PopupId(self.next());
        self.popups.insert(id);
        self.commands.push(MapCommand::AddPopup {
            id,
            at,
            content: content.clone(),
        });
        Ok(id)
    }

    fn remove_popup(&mut self, id: PopupId) -> Result<(), SurfaceError> {
        if !self.popups.remove(&id) {
            return Err(SurfaceError::UnknownPopup(id));
        }
        self.commands.push(MapCommand::RemovePopup { id });
        Ok(())
    }

    fn fit_bounds(
        &mut self,
        bounds: &BoundingBox,
        padding: u32,
        max_zoom: f64,
    ) -> Result<(), SurfaceError> {
        self.commands.push(MapCommand::FitBounds {
            bounds: *bounds,
            padding,
            max_zoom,
        });
        Ok(())
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) -> Result<(), SurfaceError> {
        self.commands.push(MapCommand::SetView { center, zoom });
        Ok(())
    }
}
