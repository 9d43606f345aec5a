//! Bounding boxes for viewport fitting.
//!
//! Purely geometric: a recursive walk over the untyped coordinate tree,
//! accumulating min/max latitude and longitude. "No usable geometry" is an
//! ordinary `None` outcome, never a suppressed failure.

use crate::model::{FeatureCollection, Geometry};
use serde_json::Value as JsonValue;

/// Minimal bounding box of one or more geometries, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    fn point(lat: f64, lon: f64) -> Self {
        Self {
            min_lat: lat,
            min_lon: lon,
            max_lat: lat,
            max_lon: lon,
        }
    }

    fn include(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lat = self.max_lat.max(lat);
        self.max_lon = self.max_lon.max(lon);
    }

    /// Geographic center of the box.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Bounding box of a single geometry's coordinate tree.
///
/// Descends nested arrays (a `Polygon`'s rings, a `MultiPolygon`'s
/// polygons) until reaching a `(longitude, latitude)` pair. Zero pairs —
/// including arbitrarily nested empty arrays — yield `None`.
#[must_use]
pub fn bounds_of(geometry: &Geometry) -> Option<Bounds> {
    let mut acc = None;
    walk(&geometry.coordinates, &mut acc);
    acc
}

/// Viewport bounds for a collection: the first `Polygon` or
/// `MultiPolygon` feature with usable coordinates wins.
#[must_use]
pub fn collection_bounds(collection: &FeatureCollection) -> Option<Bounds> {
    collection
        .features
        .iter()
        .filter_map(|feature| feature.geometry.as_ref())
        .find(|geometry| matches!(geometry.kind.as_str(), "Polygon" | "MultiPolygon"))
        .and_then(bounds_of)
}

fn walk(value: &JsonValue, acc: &mut Option<Bounds>) {
    let Some(items) = value.as_array() else {
        return;
    };

    // A leaf pair is [lon, lat, ...]; anything deeper nests further.
    if let Some(first) = items.first() {
        if first.is_number() {
            if let (Some(lon), Some(lat)) = (
                first.as_f64(),
                items.get(1).and_then(JsonValue::as_f64),
            ) {
                match acc {
                    Some(bounds) => bounds.include(lat, lon),
                    None => *acc = Some(Bounds::point(lat, lon)),
                }
            }
            return;
        }
    }

    for item in items {
        walk(item, acc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FEATURE_COLLECTION, Feature};
    use serde_json::json;

    fn polygon(coordinates: JsonValue) -> Geometry {
        Geometry {
            kind: "Polygon".to_string(),
            coordinates,
        }
    }

    #[test]
    fn single_ring_bounds() {
        let geometry = polygon(json!([[[-89.0, 37.2], [-88.3, 37.1], [-87.7, 37.3]]]));
        let bounds = bounds_of(&geometry).expect("bounds");

        assert!((bounds.min_lat - 37.1).abs() < f64::EPSILON);
        assert!((bounds.min_lon - -89.0).abs() < f64::EPSILON);
        assert!((bounds.max_lat - 37.3).abs() < f64::EPSILON);
        assert!((bounds.max_lon - -87.7).abs() < f64::EPSILON);
    }

    #[test]
    fn multipolygon_nests_one_level_deeper() {
        let geometry = Geometry {
            kind: "MultiPolygon".to_string(),
            coordinates: json!([
                [[[-85.0, 38.0], [-84.0, 38.5]]],
                [[[-83.0, 37.0], [-82.5, 37.5]]]
            ]),
        };
        let bounds = bounds_of(&geometry).expect("bounds");
        assert!((bounds.min_lon - -85.0).abs() < f64::EPSILON);
        assert!((bounds.max_lon - -82.5).abs() < f64::EPSILON);
        assert!((bounds.min_lat - 37.0).abs() < f64::EPSILON);
        assert!((bounds.max_lat - 38.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_coordinate_pairs_yield_none() {
        assert_eq!(bounds_of(&polygon(json!([]))), None);
        assert_eq!(bounds_of(&polygon(json!([[], [[]], [[[], []]]]))), None);
        assert_eq!(bounds_of(&polygon(JsonValue::Null)), None);
    }

    #[test]
    fn lone_number_in_a_pair_is_ignored() {
        // A leaf with a single number can't form a (lon, lat) pair.
        assert_eq!(bounds_of(&polygon(json!([[-89.0]]))), None);
    }

    #[test]
    fn collection_bounds_use_first_area_feature() {
        let collection = FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features: vec![
                Feature {
                    kind: "Feature".to_string(),
                    properties: JsonValue::Null,
                    geometry: Some(Geometry {
                        kind: "Point".to_string(),
                        coordinates: json!([-85.7585, 38.2527]),
                    }),
                },
                Feature {
                    kind: "Feature".to_string(),
                    properties: JsonValue::Null,
                    geometry: Some(polygon(json!([[[-86.1, 38.4], [-85.3, 38.2]]]))),
                },
            ],
        };

        let bounds = collection_bounds(&collection).expect("bounds");
        // The Point feature is skipped; the polygon drives the viewport.
        assert!((bounds.max_lat - 38.4).abs() < f64::EPSILON);
        assert!((bounds.min_lon - -86.1).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let collection = FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features: Vec::new(),
        };
        assert_eq!(collection_bounds(&collection), None);
    }

    #[test]
    fn center_is_the_midpoint() {
        let bounds = Bounds {
            min_lat: 37.0,
            min_lon: -89.0,
            max_lat: 39.0,
            max_lon: -85.0,
        };
        assert_eq!(bounds.center(), (38.0, -87.0));
    }
}
