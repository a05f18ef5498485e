//! GeoJSON helpers used by the map layers.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Position, Value};
use serde::{Deserialize, Serialize};

/// Assigns the feature index as id to every feature that has none.
///
/// Stateful feature APIs of rendering engines address features by id, so every feature of a
/// region source needs one.
pub fn assign_feature_ids(collection: &mut FeatureCollection) {
    for (index, feature) in collection.features.iter_mut().enumerate() {
        if feature.id.is_none() {
            feature.id = Some(Id::Number(serde_json::Number::from(index)));
        }
    }
}

/// Returns the display name of a feature, stored in the `NAME` (or `name`) property.
pub fn feature_name(feature: &Feature) -> Option<&str> {
    feature
        .property("NAME")
        .or_else(|| feature.property("name"))
        .and_then(|value| value.as_str())
}

/// Geographic bounding box in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Western edge.
    pub min_lon: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
}

impl Bounds {
    /// Creates a new bounding box.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Bounding box of a single point.
    pub fn from_point(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, lon, lat)
    }

    /// Extends the box to contain the given point.
    pub fn extend(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Center point as `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Bounding box of all features of the collection. Returns `None` if the collection has no
    /// coordinates.
    pub fn from_collection(collection: &FeatureCollection) -> Option<Self> {
        collection
            .features
            .iter()
            .filter_map(Self::from_feature)
            .reduce(|a, b| a.merge(b))
    }

    /// Bounding box of the first feature of the collection.
    pub fn from_first_feature(collection: &FeatureCollection) -> Option<Self> {
        collection.features.first().and_then(Self::from_feature)
    }

    /// Bounding box of the feature geometry.
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        feature.geometry.as_ref().and_then(Self::from_geometry)
    }

    /// Bounding box of a geometry.
    pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        visit_positions(&geometry.value, &mut |position| {
            let (Some(&lon), Some(&lat)) = (position.first(), position.get(1)) else {
                return;
            };

            bounds = Some(match bounds {
                None => Self::from_point(lon, lat),
                Some(mut b) => {
                    b.extend(lon, lat);
                    b
                }
            });
        });

        bounds
    }
}

fn visit_positions(value: &Value, f: &mut impl FnMut(&Position)) {
    match value {
        Value::Point(p) => f(p),
        Value::MultiPoint(points) | Value::LineString(points) => points.iter().for_each(f),
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            lines.iter().flatten().for_each(f)
        }
        Value::MultiPolygon(polygons) => polygons.iter().flatten().flatten().for_each(f),
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                visit_positions(&geometry.value, f);
            }
        }
    }
}
