use serde::{Deserialize, Serialize};

/// Geographic position in degrees. Serialized as a GeoJSON `[lng, lat]` pair.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lng: pair[0],
            lat: pair[1],
        }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

/// Feature geometry. Opaque to the classification core beyond bounds-center
/// derivation; polygon ring layout follows GeoJSON (outer ring first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: LngLat },
    Polygon { coordinates: Vec<Vec<LngLat>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<LngLat>>> },
}

impl Geometry {
    /// Axis-aligned extent over every position, or None for empty geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut acc: Option<Bounds> = None;
        self.for_each_position(&mut |p| {
            acc = Some(match acc {
                None => Bounds { min: p, max: p },
                Some(b) => Bounds {
                    min: LngLat::new(b.min.lng.min(p.lng), b.min.lat.min(p.lat)),
                    max: LngLat::new(b.max.lng.max(p.lng), b.max.lat.max(p.lat)),
                },
            });
        });
        acc
    }

    fn for_each_position(&self, f: &mut impl FnMut(LngLat)) {
        match self {
            Geometry::Point { coordinates } => f(*coordinates),
            Geometry::Polygon { coordinates } => {
                for ring in coordinates {
                    for p in ring {
                        f(*p);
                    }
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for poly in coordinates {
                    for ring in poly {
                        for p in ring {
                            f(*p);
                        }
                    }
                }
            }
        }
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub min: LngLat,
    pub max: LngLat,
}

impl Bounds {
    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.min.lng + self.max.lng) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_bounds_are_degenerate() {
        let g = Geometry::Point {
            coordinates: LngLat::new(-89.4, 43.07),
        };
        let b = g.bounds().unwrap();
        assert_eq!(b.min, b.max);
        assert_eq!(b.center(), LngLat::new(-89.4, 43.07));
    }

    #[test]
    fn polygon_bounds_center() {
        let g = Geometry::Polygon {
            coordinates: vec![vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(4.0, 0.0),
                LngLat::new(4.0, 2.0),
                LngLat::new(0.0, 2.0),
                LngLat::new(0.0, 0.0),
            ]],
        };
        assert_eq!(g.bounds().unwrap().center(), LngLat::new(2.0, 1.0));
    }

    #[test]
    fn geometry_parses_geojson_shapes() {
        let g: Geometry =
            serde_json::from_str(r#"{"type":"Point","coordinates":[-89.4,43.07]}"#).unwrap();
        assert_eq!(
            g,
            Geometry::Point {
                coordinates: LngLat::new(-89.4, 43.07)
            }
        );

        let g: Geometry = serde_json::from_str(
            r#"{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[1,1],[0,0]]]]}"#,
        )
        .unwrap();
        assert!(matches!(g, Geometry::MultiPolygon { .. }));
    }
}
