use crate::geometry::{Geometry, LngLat};

/// Collaborator that supplies a representative point for a geometry, used
/// when point symbols must be placed on areal features.
pub trait AnchorSource {
    fn representative_point(&self, geometry: &Geometry) -> Option<LngLat>;
}

/// Bounding-box center placement. Matches the viewer's polygon-to-point
/// conversion (Leaflet `getBounds().getCenter()`).
#[derive(Debug, Default, Copy, Clone)]
pub struct BoundsCenter;

impl AnchorSource for BoundsCenter {
    fn representative_point(&self, geometry: &Geometry) -> Option<LngLat> {
        match geometry {
            Geometry::Point { coordinates } => Some(*coordinates),
            _ => geometry.bounds().map(|b| b.center()),
        }
    }
}
