//! Marker and popup lifecycle on a [`MapSurface`].
//!
//! The controller is the only owner of the surface. It keeps one marker per
//! located branch and at most one attached popup. Marker clicks and list
//! selection both open popups through [`MarkerController::select`], which
//! closes whatever is open before attaching the new one.

use clinicmap_core::Coordinate;

use crate::bounds::Viewport;
use crate::error::SurfaceError;
use crate::location::{MarkerContent, ResolvedLocation};
use crate::surface::{MapSurface, MarkerId, PopupId};

/// Input forwarded from the map's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// Click on the bare map.
    SurfaceClick,
    MarkerClick(MarkerId),
}

#[derive(Debug)]
struct MarkerEntry {
    marker: MarkerId,
    /// Position in the location list passed to `replace_all`.
    location_index: usize,
    at: Coordinate,
    /// Popup content, built with the marker but attached only on activation.
    content: MarkerContent,
}

#[derive(Debug, Clone, Copy)]
struct OpenPopup {
    entry: usize,
    popup: PopupId,
}

pub struct MarkerController<S: MapSurface> {
    surface: S,
    entries: Vec<MarkerEntry>,
    open: Option<OpenPopup>,
}

impl<S: MapSurface> MarkerController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            entries: Vec::new(),
            open: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn marker_ids(&self) -> Vec<MarkerId> {
        self.entries.iter().map(|e| e.marker).collect()
    }

    /// Marker id for a location index, if that location has a marker.
    #[must_use]
    pub fn marker_for(&self, location_index: usize) -> Option<MarkerId> {
        self.entries
            .iter()
            .find(|e| e.location_index == location_index)
            .map(|e| e.marker)
    }

    /// Location index whose popup is open.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.open.map(|o| self.entries[o.entry].location_index)
    }

    /// Marker whose popup is attached.
    #[must_use]
    pub fn attached_popup(&self) -> Option<MarkerId> {
        self.open.map(|o| self.entries[o.entry].marker)
    }

    /// Disposes every existing marker and popup, then builds one marker per
    /// location with a coordinate. Returns the number of markers placed.
    ///
    /// If the surface rejects a marker midway, the markers added so far are
    /// removed again and the controller is left empty.
    ///
    /// # Errors
    ///
    /// Returns the [`SurfaceError`] that stopped the build.
    pub fn replace_all(
        &mut self,
        locations: &[ResolvedLocation],
    ) -> Result<usize, SurfaceError> {
        self.teardown();

        let mut built = Vec::with_capacity(locations.len());
        for (location_index, location) in locations.iter().enumerate() {
            let Some(at) = location.coordinate else {
                continue;
            };
            let content = MarkerContent::from(&location.branch);
            match self.surface.add_marker(at, &content) {
                Ok(marker) => built.push(MarkerEntry {
                    marker,
                    location_index,
                    at,
                    content,
                }),
                Err(e) => {
                    for entry in &built {
                        if let Err(cleanup) = self.surface.remove_marker(entry.marker) {
                            tracing::warn!(
                                marker = %entry.marker,
                                error = %cleanup,
                                "marker rollback failed"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        self.entries = built;
        tracing::debug!(markers = self.entries.len(), "marker set rebuilt");
        Ok(self.entries.len())
    }

    /// Opens the popup for `location_index`, closing any other. Returns
    /// `false` when the location has no marker.
    pub fn select(&mut self, location_index: usize) -> bool {
        match self
            .entries
            .iter()
            .position(|e| e.location_index == location_index)
        {
            Some(entry) => self.show_popup(entry),
            None => false,
        }
    }

    /// Marker click path. Returns `false` for an unknown marker.
    pub fn activate(&mut self, marker: MarkerId) -> bool {
        match self.entries.iter().position(|e| e.marker == marker) {
            Some(entry) => self.show_popup(entry),
            None => false,
        }
    }

    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::SurfaceClick => self.close_popups(),
            MapEvent::MarkerClick(marker) => {
                self.activate(marker);
            }
        }
    }

    /// Detaches the open popup, if any.
    pub fn close_popups(&mut self) {
        if let Some(open) = self.open.take() {
            if let Err(e) = self.surface.remove_popup(open.popup) {
                tracing::warn!(popup = %open.popup, error = %e, "popup detach failed");
            }
        }
    }

    /// Moves the surface to `viewport`. Failures are logged, not returned.
    pub fn apply_viewport(&mut self, viewport: &Viewport) {
        let result = match viewport {
            Viewport::Center { center, zoom } => self.surface.set_view(*center, *zoom),
            Viewport::Bounds {
                bounds,
                padding,
                max_zoom,
            } => self.surface.fit_bounds(bounds, *padding, *max_zoom),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "viewport update failed");
        }
    }

    /// Removes the popup and every marker from the surface.
    pub fn teardown(&mut self) {
        self.close_popups();
        for entry in self.entries.drain(..) {
            if let Err(e) = self.surface.remove_marker(entry.marker) {
                tracing::warn!(marker = %entry.marker, error = %e, "marker removal failed");
            }
        }
    }

    fn show_popup(&mut self, entry: usize) -> bool {
        self.close_popups();
        let MarkerEntry { at, content, .. } = &self.entries[entry];
        match self.surface.add_popup(*at, content) {
            Ok(popup) => {
                self.open = Some(OpenPopup { entry, popup });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "popup attach failed");
                false
            }
        }
    }
}

impl<S: MapSurface> Drop for MarkerController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
