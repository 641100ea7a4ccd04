//! Viewport framing for a set of resolved locations.

use clinicmap_core::Coordinate;
use serde::Serialize;

use crate::location::ResolvedLocation;

/// Zoom used when a single location is shown.
pub const NEIGHBORHOOD_ZOOM: f64 = 14.0;
/// Screen padding, in pixels, around a fitted bounding box.
pub const FIT_PADDING_PX: u32 = 50;
/// Zoom ceiling for fitted bounds so two nearby points do not over-zoom.
pub const FIT_MAX_ZOOM: f64 = 15.0;

const US_CENTER: Coordinate = Coordinate {
    lat: 39.828_3,
    lng: -98.579_5,
};
const US_ZOOM: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Smallest box containing every point. `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_lat: first.lat,
            min_lng: first.lng,
            max_lat: first.lat,
            max_lng: first.lng,
        };
        Some(points.fold(seed, |b, p| Self {
            min_lat: b.min_lat.min(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lat: b.max_lat.max(p.lat),
            max_lng: b.max_lng.max(p.lng),
        }))
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    /// True when every point was identical.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min_lat == self.max_lat && self.min_lng == self.max_lng
    }
}

/// How the map should frame its locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    Center {
        center: Coordinate,
        zoom: f64,
    },
    Bounds {
        bounds: BoundingBox,
        padding: u32,
        max_zoom: f64,
    },
}

impl Viewport {
    /// Country-wide view used when nothing resolved.
    #[must_use]
    pub fn default_region() -> Self {
        Self::Center {
            center: US_CENTER,
            zoom: US_ZOOM,
        }
    }
}

/// Frames the locations that have a coordinate.
///
/// - none resolved: `None`; callers fall back to [`Viewport::default_region`]
/// - one resolved: centered at [`NEIGHBORHOOD_ZOOM`]
/// - two or more: the bounding box with padding and a zoom ceiling. Points
///   at the same spot give a degenerate box, which is still returned as
///   bounds.
#[must_use]
pub fn compute_viewport(locations: &[ResolvedLocation]) -> Option<Viewport> {
    let points: Vec<Coordinate> = locations.iter().filter_map(|l| l.coordinate).collect();

    match points.as_slice() {
        [] => None,
        [only] => Some(Viewport::Center {
            center: *only,
            zoom: NEIGHBORHOOD_ZOOM,
        }),
        _ => BoundingBox::from_points(points).map(|bounds| Viewport::Bounds {
            bounds,
            padding: FIT_PADDING_PX,
            max_zoom: FIT_MAX_ZOOM,
        }),
    }
}

#[cfg(test)]
mod tests {
    use clinicmap_core::Branch;

    use super::*;

    fn located(coord: Option<(f64, f64)>) -> ResolvedLocation {
        ResolvedLocation {
            branch: Branch {
                name: "Branch".to_string(),
                street: None,
                locality: String::new(),
                phone: None,
            },
            coordinate: coord.map(|(lat, lng)| Coordinate::new(lat, lng)),
        }
    }

    #[test]
    fn empty_input_has_no_viewport() {
        assert_eq!(compute_viewport(&[]), None);
    }

    #[test]
    fn unresolved_only_has_no_viewport() {
        assert_eq!(compute_viewport(&[located(None), located(None)]), None);
    }

    #[test]
    fn single_point_is_center_and_zoom() {
        let vp = compute_viewport(&[located(None), located(Some((30.27, -97.74)))]);
        assert_eq!(
            vp,
            Some(Viewport::Center {
                center: Coordinate::new(30.27, -97.74),
                zoom: NEIGHBORHOOD_ZOOM,
            })
        );
    }

    #[test]
    fn many_points_give_min_max_box() {
        let vp = compute_viewport(&[
            located(Some((30.27, -97.74))),
            located(None),
            located(Some((39.53, -119.81))),
            located(Some((32.78, -96.80))),
        ])
        .unwrap();
        let Viewport::Bounds {
            bounds,
            padding,
            max_zoom,
        } = vp
        else {
            panic!("expected bounds, got {vp:?}");
        };
        assert_eq!(bounds.min_lat, 30.27);
        assert_eq!(bounds.max_lat, 39.53);
        assert_eq!(bounds.min_lng, -119.81);
        assert_eq!(bounds.max_lng, -96.80);
        assert_eq!(padding, FIT_PADDING_PX);
        assert_eq!(max_zoom, FIT_MAX_ZOOM);
    }

    #[test]
    fn identical_points_give_degenerate_bounds() {
        let vp = compute_viewport(&[
            located(Some((30.27, -97.74))),
            located(Some((30.27, -97.74))),
        ])
        .unwrap();
        match vp {
            Viewport::Bounds { bounds, .. } => {
                assert!(bounds.is_degenerate());
                assert!(bounds.contains(Coordinate::new(30.27, -97.74)));
            }
            Viewport::Center { .. } => panic!("expected bounds"),
        }
    }

    #[test]
    fn bounds_contain_every_input_point() {
        let points = [(1.0, 1.0), (-3.0, 7.5), (2.5, -4.0), (0.0, 0.0)];
        let bbox =
            BoundingBox::from_points(points.iter().map(|&(lat, lng)| Coordinate::new(lat, lng)))
                .unwrap();
        for (lat, lng) in points {
            assert!(bbox.contains(Coordinate::new(lat, lng)));
        }
        assert_eq!(bbox.center(), Coordinate::new(-0.25, 1.75));
    }

    #[test]
    fn default_region_is_continental_us() {
        let Viewport::Center { center, zoom } = Viewport::default_region() else {
            panic!("expected center");
        };
        assert_eq!(center, Coordinate::new(39.8283, -98.5795));
        assert_eq!(zoom, 3.5);
    }

    #[test]
    fn viewport_serializes_with_kind_tag() {
        let json = serde_json::to_value(Viewport::default_region()).unwrap();
        assert_eq!(json["kind"], "center");
        assert_eq!(json["zoom"], 3.5);
    }
}
