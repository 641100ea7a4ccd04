//! Generation-tagged map loading.
//!
//! Each [`MapSession::begin`] bumps the generation and hands back a ticket
//! with the addresses to resolve. Results are applied by
//! [`MapSession::complete`] only if their ticket is still current; anything
//! older is dropped on arrival. Markers are built once per batch, after
//! every address has resolved.

use std::fmt;

use clinicmap_core::{Branch, Coordinate};
use serde::Serialize;

use crate::bounds::{compute_viewport, Viewport};
use crate::controller::{MapEvent, MarkerController};
use crate::error::{MapError, SurfaceError};
use crate::location::ResolvedLocation;
use crate::surface::{MapSurface, MarkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Work order for one location set.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    pub generation: Generation,
    /// One geocoding query per branch, in branch order.
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied {
        markers: usize,
        viewport: Option<Viewport>,
    },
    /// The ticket was superseded; nothing changed.
    Stale { generation: Generation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    SurfaceUnavailable,
    NoResolvedLocations,
    /// Coordinates resolved but the surface rejected the markers.
    MarkerBuildFailed,
}

/// What the page should show for the current location set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MapRender {
    Map {
        viewport: Viewport,
        markers: Vec<PlacedMarker>,
        locations: Vec<ResolvedLocation>,
    },
    LocationList {
        reason: FallbackReason,
        locations: Vec<ResolvedLocation>,
    },
}

impl MapRender {
    /// The location-list fallback for branches that were never resolved.
    #[must_use]
    pub fn fallback(reason: FallbackReason, branches: &[Branch]) -> Self {
        Self::LocationList {
            reason,
            locations: ResolvedLocation::zip(branches, &[]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedMarker {
    pub marker: MarkerId,
    pub location_index: usize,
}

pub struct MapSession<S: MapSurface> {
    controller: MarkerController<S>,
    generation: Generation,
    pending: Option<Vec<Branch>>,
    locations: Vec<ResolvedLocation>,
    viewport: Option<Viewport>,
    fallback: FallbackReason,
}

impl<S: MapSurface> MapSession<S> {
    /// Takes ownership of a freshly constructed surface.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SurfaceUnavailable`] if the surface could not be
    /// created; the caller should show the location list instead.
    pub fn open(surface: Result<S, SurfaceError>) -> Result<Self, MapError> {
        let surface = surface.map_err(|e| {
            tracing::warn!(error = %e, "map surface unavailable");
            MapError::SurfaceUnavailable(e)
        })?;
        Ok(Self::new(surface))
    }

    /// Wraps a surface that is already known to be usable.
    pub fn new(surface: S) -> Self {
        Self {
            controller: MarkerController::new(surface),
            generation: Generation(0),
            pending: None,
            locations: Vec::new(),
            viewport: None,
            fallback: FallbackReason::NoResolvedLocations,
        }
    }

    /// Starts loading a new location set and supersedes any batch in flight.
    ///
    /// The previous set's markers, popup and locations are dropped here, so
    /// nothing from it can be selected or rendered while the new set loads.
    pub fn begin(&mut self, branches: &[Branch]) -> LoadTicket {
        self.generation = Generation(self.generation.0 + 1);
        self.pending = Some(branches.to_vec());
        self.controller.teardown();
        self.locations.clear();
        self.viewport = None;
        self.fallback = FallbackReason::NoResolvedLocations;
        tracing::debug!(
            generation = %self.generation,
            branches = branches.len(),
            "map load started"
        );
        LoadTicket {
            generation: self.generation,
            addresses: branches.iter().map(Branch::geocode_query).collect(),
        }
    }

    /// Applies resolver output for `generation` if it is still current.
    ///
    /// Rebuilds the marker set and moves the view: to the computed viewport,
    /// or to [`Viewport::default_region`] when nothing resolved. A marker
    /// build failure leaves an empty map, is logged, and renders as
    /// [`FallbackReason::MarkerBuildFailed`].
    pub fn complete(
        &mut self,
        generation: Generation,
        coordinates: &[Option<Coordinate>],
    ) -> LoadOutcome {
        if generation != self.generation {
            tracing::debug!(
                %generation,
                current = %self.generation,
                "discarding stale map load"
            );
            return LoadOutcome::Stale { generation };
        }
        let Some(branches) = self.pending.take() else {
            // already applied
            return LoadOutcome::Stale { generation };
        };

        let locations = ResolvedLocation::zip(&branches, coordinates);
        let viewport = compute_viewport(&locations);

        let (markers, fallback) = match self.controller.replace_all(&locations) {
            Ok(n) => (n, FallbackReason::NoResolvedLocations),
            Err(e) => {
                tracing::warn!(error = %e, "marker build failed; showing empty map");
                (0, FallbackReason::MarkerBuildFailed)
            }
        };
        let viewport = if markers == 0 { None } else { viewport };
        self.controller
            .apply_viewport(&viewport.unwrap_or_else(Viewport::default_region));

        self.locations = locations;
        self.viewport = viewport;
        self.fallback = fallback;
        LoadOutcome::Applied {
            markers,
            viewport: self.viewport,
        }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn locations(&self) -> &[ResolvedLocation] {
        &self.locations
    }

    /// Opens the popup for a location chosen outside the map.
    pub fn select(&mut self, location_index: usize) -> bool {
        self.controller.select(location_index)
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.controller.selected()
    }

    pub fn handle_event(&mut self, event: MapEvent) {
        self.controller.handle_event(event);
    }

    pub fn surface(&self) -> &S {
        self.controller.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.controller.surface_mut()
    }

    /// Map view when at least one marker is placed, otherwise the location
    /// list.
    #[must_use]
    pub fn render(&self) -> MapRender {
        match self.viewport {
            Some(viewport) => MapRender::Map {
                viewport,
                markers: self
                    .locations
                    .iter()
                    .enumerate()
                    .filter_map(|(location_index, _)| {
                        self.controller
                            .marker_for(location_index)
                            .map(|marker| PlacedMarker {
                                marker,
                                location_index,
                            })
                    })
                    .collect(),
                locations: self.locations.clone(),
            },
            None => MapRender::LocationList {
                reason: self.fallback,
                locations: self.locations.clone(),
            },
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
